//! The version-control collaborator used by the comparator

use crate::error::GitResult;

/// Read access to a repository's history.
///
/// Implementations must bound every call in time and report a timeout as an
/// error rather than blocking indefinitely.
pub trait VersionControl {
    /// Whether the working directory is inside a repository
    fn is_repository(&self) -> bool;

    /// Refresh remote refs
    fn fetch(&self) -> GitResult<()>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> GitResult<String>;

    /// Common ancestor of two refs, or `None` when they share no history
    fn merge_base(&self, ref_a: &str, ref_b: &str) -> GitResult<Option<String>>;

    /// Number of commits reachable from `head` but not from `base`
    fn commits_between(&self, base: &str, head: &str) -> GitResult<u32>;

    /// Paths changed between two refs
    fn diff_files(&self, ref_a: &str, ref_b: &str) -> GitResult<Vec<String>>;
}
