//! The orchestrator behind every CLI command

use crate::result::{CheckResult, LintResult, ProtectResult, ReadyResult};
use mq_core::risk::category;
use mq_core::{IssueKind, MigrationGraph, MigrationRecord, RiskScorer, Settings};
use mq_discover::resolve_adapter;
use mq_git::{BranchComparator, ComparisonReport, GitClient, GitError, GitResult, VersionControl};
use mq_lint::RuleEngine;
use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Runs the analyses for one project directory.
///
/// Migrations are discovered on first use and reused by later operations on
/// the same engine.
pub struct MigrationEngine {
    settings: Settings,
    root_dir: PathBuf,
    rules: RuleEngine,
    vcs: Option<Box<dyn VersionControl>>,
    records: OnceCell<Vec<MigrationRecord>>,
}

impl MigrationEngine {
    pub fn new(settings: Settings, root_dir: impl AsRef<Path>) -> Self {
        let root_dir = root_dir.as_ref();
        let rules = RuleEngine::from_config(&settings.rules);
        Self {
            settings,
            root_dir: root_dir
                .canonicalize()
                .unwrap_or_else(|_| root_dir.to_path_buf()),
            rules,
            vcs: None,
            records: OnceCell::new(),
        }
    }

    /// Use `vcs` for branch comparison instead of running git in the root directory
    pub fn with_version_control(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Discovered migrations across every configured migration directory
    pub fn migrations(&self) -> &[MigrationRecord] {
        self.records.get_or_init(|| self.discover())
    }

    fn discover(&self) -> Vec<MigrationRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for dir in &self.settings.migration_dirs {
            let path = self.root_dir.join(dir);
            if !path.is_dir() {
                log::warn!("Migration directory '{}' does not exist, skipping", dir);
                continue;
            }

            let adapter = resolve_adapter(self.settings.framework, &path);
            log::debug!(
                "Scanning {} with the {} adapter",
                path.display(),
                adapter.framework()
            );

            for record in adapter.discover_migrations() {
                if seen.insert(record.id.clone()) {
                    records.push(record);
                } else {
                    log::warn!(
                        "Duplicate migration id '{}' in {}, keeping the first",
                        record.id,
                        record.display_path()
                    );
                }
            }
        }

        log::debug!("Discovered {} migration(s)", records.len());
        records
    }

    fn graph(&self) -> MigrationGraph {
        MigrationGraph::build(self.migrations())
    }

    /// Structural analysis of the migration graph
    pub fn run_check(&self) -> CheckResult {
        let graph = self.graph();
        CheckResult {
            migrations: self.migrations().to_vec(),
            graph_issues: graph.analyze(),
            heads: graph.find_heads(),
            roots: graph.find_roots(),
        }
    }

    /// Run every enabled lint rule
    pub fn run_lint(&self) -> LintResult {
        let graph = self.graph();
        LintResult {
            violations: self.rules.run(self.migrations(), &graph),
        }
    }

    /// Compare the current branch against `target`, or the configured target branch
    pub fn run_compare(&self, target: Option<&str>) -> GitResult<ComparisonReport> {
        let target = target.unwrap_or(self.settings.target_branch.as_str());

        let client;
        let vcs: &dyn VersionControl = match &self.vcs {
            Some(vcs) => vcs.as_ref(),
            None => {
                client = GitClient::new(&self.root_dir);
                &client
            }
        };

        if !vcs.is_repository() {
            return Err(GitError::NotARepository {
                path: self.root_dir.display().to_string(),
            });
        }

        BranchComparator::new(vcs).compare(target)
    }

    /// Check, lint, compare and score.
    ///
    /// A failed comparison is logged and left out; it never aborts the rest.
    pub fn run_ready(&self) -> ReadyResult {
        let compare = match self.run_compare(None) {
            Ok(report) => Some(report),
            Err(e) => {
                log::warn!("Branch comparison skipped: {}", e);
                None
            }
        };
        let check = self.run_check();
        let lint = self.run_lint();

        let mut scorer = RiskScorer::new(self.settings.weights());
        for violation in &lint.violations {
            scorer.add_finding(
                violation.rule_id.risk_category(),
                violation.message.as_str(),
                Some(violation.file_path.as_str()),
            );
        }
        for issue in &check.graph_issues {
            if issue.kind == IssueKind::MultipleHeads {
                scorer.add_finding(category::MULTIPLE_HEADS, issue.description.as_str(), None);
            }
        }
        if let Some(report) = compare.as_ref().filter(|r| r.is_behind) {
            scorer.add_finding(
                category::BRANCH_BEHIND_TARGET,
                format!(
                    "Branch is {} commit(s) behind '{}'",
                    report.commits_behind, report.target_branch
                ),
                None,
            );
        }

        ReadyResult {
            check,
            lint,
            compare,
            risk: scorer.into_report(),
        }
    }

    /// `ready`, gated on `threshold` or the configured risk threshold
    pub fn run_protect(&self, threshold: Option<u32>) -> ProtectResult {
        ProtectResult {
            ready: self.run_ready(),
            threshold: threshold.unwrap_or(self.settings.risk_threshold),
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
