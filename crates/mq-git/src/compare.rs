//! Branch comparison: detect migration divergence against a target branch

use crate::error::GitResult;
use crate::traits::VersionControl;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of comparing the current branch against a target branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub current_branch: String,
    pub target_branch: String,
    pub is_behind: bool,
    pub commits_behind: u32,
    /// Migration files changed only on the current branch
    pub current_only: Vec<String>,
    /// Migration files changed only on the target branch
    pub target_only: Vec<String>,
    /// Migration files changed on both branches
    pub parallel_migrations: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ComparisonReport {
    /// True when the branch is behind or the branches' migrations diverge
    pub fn has_issues(&self) -> bool {
        self.is_behind || !self.parallel_migrations.is_empty() || !self.target_only.is_empty()
    }

    fn add_suggestions(&mut self) {
        if self.is_behind {
            self.suggestions.push(format!(
                "Your branch is {} commit(s) behind '{}'. Rebase or merge the target branch first.",
                self.commits_behind, self.target_branch
            ));
        }
        if !self.target_only.is_empty() {
            self.suggestions.push(format!(
                "Target branch has {} new migration(s) not in your branch. \
                 Merge the target branch and resolve any migration conflicts.",
                self.target_only.len()
            ));
        }
        if !self.parallel_migrations.is_empty() {
            self.suggestions.push(format!(
                "Found {} migration file(s) modified on both branches. \
                 This is likely to cause merge conflicts; coordinate with the other branch author.",
                self.parallel_migrations.len()
            ));
        }
        if !self.current_only.is_empty() && !self.target_only.is_empty() {
            self.suggestions.push(
                "Both branches added new migrations. After merging, run \
                 'makemigrations --merge' (Django) or 'alembic merge' (Alembic) \
                 to create a merge migration."
                    .to_string(),
            );
        }
    }
}

/// Whether a changed path looks like a migration file.
///
/// Python files under a `migrations` or `versions` directory qualify.
pub fn is_migration_file(path: &str) -> bool {
    if !path.ends_with(".py") {
        return false;
    }
    let normalized = path.replace('\\', "/");
    normalized
        .split('/')
        .any(|part| part == "migrations" || part == "versions")
}

/// Compares migration changes between the current branch and a target
pub struct BranchComparator<'a> {
    vcs: &'a dyn VersionControl,
}

impl<'a> BranchComparator<'a> {
    pub fn new(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs }
    }

    /// Compare the checked-out branch against `target_branch`.
    ///
    /// Branches without a common ancestor yield a report with a single
    /// suggestion rather than an error.
    pub fn compare(&self, target_branch: &str) -> GitResult<ComparisonReport> {
        let mut report = ComparisonReport {
            target_branch: target_branch.to_string(),
            ..Default::default()
        };

        self.vcs.fetch()?;
        report.current_branch = self.vcs.current_branch()?;

        let Some(merge_base) = self.vcs.merge_base(&report.current_branch, target_branch)? else {
            log::warn!(
                "No merge base between '{}' and '{}'",
                report.current_branch,
                target_branch
            );
            report.suggestions.push(
                "Could not determine merge base. Ensure both branches share a common ancestor."
                    .to_string(),
            );
            return Ok(report);
        };

        report.commits_behind = self.vcs.commits_between(&merge_base, target_branch)?;
        report.is_behind = report.commits_behind > 0;

        let current = self.migration_files(&merge_base, &report.current_branch)?;
        let target = self.migration_files(&merge_base, target_branch)?;

        report.current_only = current.difference(&target).cloned().collect();
        report.target_only = target.difference(&current).cloned().collect();
        report.parallel_migrations = current.intersection(&target).cloned().collect();

        report.add_suggestions();
        Ok(report)
    }

    fn migration_files(&self, base: &str, head: &str) -> GitResult<BTreeSet<String>> {
        Ok(self
            .vcs
            .diff_files(base, head)?
            .into_iter()
            .filter(|path| is_migration_file(path))
            .collect())
    }
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
