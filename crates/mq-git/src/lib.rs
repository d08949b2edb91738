//! mq-git: version-control access and branch comparison
//!
//! [`GitClient`] shells out to `git` with a bounded wait. The
//! [`BranchComparator`] only talks to the [`VersionControl`] trait so it can
//! be driven by a scripted fake in tests.

pub(crate) mod compare;
pub(crate) mod error;
pub(crate) mod git;
pub(crate) mod traits;

pub use compare::{is_migration_file, BranchComparator, ComparisonReport};
pub use error::{GitError, GitResult};
pub use git::{GitClient, DEFAULT_TIMEOUT};
pub use traits::VersionControl;
