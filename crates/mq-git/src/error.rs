//! Error types for mq-git

use thiserror::Error;

/// Version-control errors
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable could not be found
    #[error("[GIT001] Git is not installed or not in PATH")]
    NotInstalled,

    /// A git command did not finish in time and was killed
    #[error("[GIT002] git {command} timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// A git command exited with a non-zero status
    #[error("[GIT003] git {command} failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        stderr: String,
        code: i32,
    },

    /// The working directory is not inside a git repository
    #[error("[GIT004] Not a git repository: {path}")]
    NotARepository { path: String },

    /// Spawning or waiting on git failed
    #[error("[GIT005] git {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for GitError
pub type GitResult<T> = Result<T, GitError>;
