//! Violation model shared by every rule

use mq_core::risk::category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Violation severity level, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Potentially risky, worth reviewing
    Warning,
    /// Likely to break a deploy or running code
    Error,
    /// Irreversible data loss or a broken migration history
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Identifier of a built-in rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    DropTable,
    DropColumn,
    NonNullWithoutDefault,
    TypeChange,
    MultipleHeads,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::DropTable => "drop-table",
            RuleId::DropColumn => "drop-column",
            RuleId::NonNullWithoutDefault => "non-null-without-default",
            RuleId::TypeChange => "type-change",
            RuleId::MultipleHeads => "multiple-heads",
        }
    }

    /// Risk category a violation of this rule is scored under
    pub fn risk_category(&self) -> &'static str {
        match self {
            RuleId::DropTable => category::DROP_TABLE,
            RuleId::DropColumn => category::DROP_COLUMN,
            RuleId::NonNullWithoutDefault => category::NON_NULL_WITHOUT_DEFAULT,
            RuleId::TypeChange => category::RISKY_TYPE_CHANGE,
            RuleId::MultipleHeads => category::MULTIPLE_HEADS,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risky operation found by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule_id: RuleId,
    pub severity: Severity,
    /// Migration file the match was found in (empty when unknown)
    pub file_path: String,
    /// What was matched
    pub message: String,
    /// Why the operation is risky
    pub explanation: String,
    /// Safer multi-step alternative
    pub suggested_fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_snippet: Option<String>,
    /// 1-based line of the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_hint: Option<usize>,
}

/// Per-rule constant text attached to every violation of that rule
pub(crate) struct Guidance {
    pub(crate) rule_id: RuleId,
    pub(crate) severity: Severity,
    pub(crate) explanation: &'static str,
    pub(crate) suggested_fix: &'static str,
    pub(crate) example_snippet: Option<&'static str>,
}

impl Guidance {
    pub(crate) fn violation(
        &self,
        file_path: String,
        message: String,
        line_hint: Option<usize>,
    ) -> RuleViolation {
        RuleViolation {
            rule_id: self.rule_id,
            severity: self.severity,
            file_path,
            message,
            explanation: self.explanation.to_string(),
            suggested_fix: self.suggested_fix.to_string(),
            example_snippet: self.example_snippet.map(str::to_string),
            line_hint,
        }
    }
}

#[cfg(test)]
#[path = "violation_test.rs"]
mod tests;
