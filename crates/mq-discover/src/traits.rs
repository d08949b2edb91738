//! The adapter seam between a migration framework and the analysis core

use mq_core::{Framework, MigrationRecord};
use std::path::Path;

/// Discovers one framework's migrations under a project directory
pub trait MigrationAdapter {
    /// The framework this adapter reads
    fn framework(&self) -> Framework;

    /// Directory discovery starts from
    fn root_dir(&self) -> &Path;

    /// Whether the project under [`root_dir`](Self::root_dir) uses this framework
    fn detect_framework(&self) -> bool;

    /// Every migration found, in a stable order.
    ///
    /// Unreadable or malformed files are logged and left out.
    fn discover_migrations(&self) -> Vec<MigrationRecord>;
}
