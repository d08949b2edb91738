//! Error types for mq-discover

use thiserror::Error;

/// Errors raised while reading a single migration file
#[derive(Error, Debug)]
pub enum DiscoverError {
    /// The file or directory could not be read
    #[error("[DSC001] Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a well-formed migration
    #[error("[DSC002] Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Result type alias for DiscoverError
pub type DiscoverResult<T> = Result<T, DiscoverError>;
