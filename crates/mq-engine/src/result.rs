//! Read-only results of each engine operation

use mq_core::{GraphIssue, IssueSeverity, MigrationRecord, RiskReport};
use mq_git::ComparisonReport;
use mq_lint::{RuleViolation, Severity};
use serde::Serialize;

/// Exit code for a clean run
pub const EXIT_OK: i32 = 0;
/// Exit code when only warnings (or lint errors) were found
pub const EXIT_WARNING: i32 = 1;
/// Exit code when something critical was found
pub const EXIT_CRITICAL: i32 = 2;

/// Result of `check`: the discovered migrations and their graph's issues
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub migrations: Vec<MigrationRecord>,
    pub graph_issues: Vec<GraphIssue>,
    pub heads: Vec<String>,
    pub roots: Vec<String>,
}

impl CheckResult {
    pub fn has_critical(&self) -> bool {
        self.graph_issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Critical)
    }

    pub fn has_warnings(&self) -> bool {
        self.graph_issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Warning)
    }

    /// 2 for any critical issue, 1 for warnings only, else 0
    pub fn exit_code(&self) -> i32 {
        if self.has_critical() {
            EXIT_CRITICAL
        } else if self.has_warnings() {
            EXIT_WARNING
        } else {
            EXIT_OK
        }
    }
}

/// Result of `lint`: every rule violation, most severe first
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub violations: Vec<RuleViolation>,
}

impl LintResult {
    pub fn has_critical(&self) -> bool {
        self.count(Severity::Critical) > 0
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Number of violations at exactly `severity`
    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// 2 for any critical violation, 1 for any error, else 0
    pub fn exit_code(&self) -> i32 {
        if self.has_critical() {
            EXIT_CRITICAL
        } else if self.has_errors() {
            EXIT_WARNING
        } else {
            EXIT_OK
        }
    }
}

/// Result of `ready`: check, lint, an optional comparison and the risk score
#[derive(Debug, Clone, Serialize)]
pub struct ReadyResult {
    pub check: CheckResult,
    pub lint: LintResult,
    /// `None` when the branch comparison could not run
    pub compare: Option<ComparisonReport>,
    pub risk: RiskReport,
}

impl ReadyResult {
    /// The worse of the check and lint exit codes
    pub fn exit_code(&self) -> i32 {
        self.check.exit_code().max(self.lint.exit_code())
    }
}

/// Result of `protect`: a ready result gated on a risk threshold
#[derive(Debug, Clone, Serialize)]
pub struct ProtectResult {
    #[serde(flatten)]
    pub ready: ReadyResult,
    pub threshold: u32,
}

impl ProtectResult {
    /// True when the total risk score is strictly above the threshold
    pub fn exceeds_threshold(&self) -> bool {
        self.ready.risk.total_score() > self.threshold
    }

    pub fn exit_code(&self) -> i32 {
        let base = self.ready.exit_code();
        if self.exceeds_threshold() {
            base.max(EXIT_CRITICAL)
        } else {
            base
        }
    }
}
