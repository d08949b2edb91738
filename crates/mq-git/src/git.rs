//! `git` subprocess client

use crate::error::{GitError, GitResult};
use crate::traits::VersionControl;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

/// How long a single git command may run before it is killed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote fetched before comparing branches
const REMOTE: &str = "origin";

/// Runs git commands in a repository directory
#[derive(Debug, Clone)]
pub struct GitClient {
    repo_dir: PathBuf,
    timeout: Duration,
}

impl GitClient {
    /// Create a client for `repo_dir` with the default timeout
    pub fn new(repo_dir: impl AsRef<Path>) -> Self {
        let repo_dir = repo_dir.as_ref();
        Self {
            repo_dir: repo_dir
                .canonicalize()
                .unwrap_or_else(|_| repo_dir.to_path_buf()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Run `git <args>` and return its trimmed stdout.
    ///
    /// With `check` set a non-zero exit status is an error; otherwise the
    /// output is returned regardless of status.
    fn run(&self, args: &[&str], check: bool) -> GitResult<String> {
        let command = args.first().copied().unwrap_or("git").to_string();
        log::debug!(
            "Running: git {} (cwd={})",
            args.join(" "),
            self.repo_dir.display()
        );

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    GitError::NotInstalled
                } else {
                    GitError::Io {
                        command: command.clone(),
                        source: e,
                    }
                }
            })?;

        // Drain both pipes while waiting so a full pipe buffer cannot stall git
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                log::debug!("git {} timed out, killing process", command);
                reap(&mut child);
                return Err(GitError::Timeout {
                    command,
                    seconds: self.timeout.as_secs(),
                });
            }
            Err(source) => {
                reap(&mut child);
                return Err(GitError::Io { command, source });
            }
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if check && !status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: stderr.trim().to_string(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(stdout.trim().to_string())
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                log::debug!("Failed to read git output: {e}");
            }
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let buf = handle.and_then(|t| t.join().ok()).unwrap_or_default();
    String::from_utf8_lossy(&buf).into_owned()
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl VersionControl for GitClient {
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"], true)
            .is_ok_and(|out| out == "true")
    }

    fn fetch(&self) -> GitResult<()> {
        self.run(&["fetch", REMOTE], true).map(|_| ())
    }

    fn current_branch(&self) -> GitResult<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"], true)
    }

    fn merge_base(&self, ref_a: &str, ref_b: &str) -> GitResult<Option<String>> {
        match self.run(&["merge-base", ref_a, ref_b], true) {
            Ok(base) if !base.is_empty() => Ok(Some(base)),
            Ok(_) | Err(GitError::CommandFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn commits_between(&self, base: &str, head: &str) -> GitResult<u32> {
        let range = format!("{base}..{head}");
        let output = self.run(&["rev-list", "--count", &range], false)?;
        Ok(output.parse().unwrap_or(0))
    }

    fn diff_files(&self, ref_a: &str, ref_b: &str) -> GitResult<Vec<String>> {
        let output = self.run(&["diff", "--name-only", ref_a, ref_b], false)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
#[path = "git_test.rs"]
mod tests;
