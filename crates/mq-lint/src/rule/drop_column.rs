//! Detects dropped columns

use super::LintRule;
use crate::scan;
use crate::violation::{Guidance, RuleId, RuleViolation, Severity};
use mq_core::MigrationRecord;
use regex::Regex;
use std::sync::OnceLock;

const GUIDANCE: Guidance = Guidance {
    rule_id: RuleId::DropColumn,
    severity: Severity::Error,
    explanation: "Dropping a column deletes its data, and any deployed code that still \
                  reads or writes the column starts failing as soon as the migration runs.",
    suggested_fix: "1. Ship code that no longer touches the column.\n\
                    2. Make the column nullable so writes stop depending on it.\n\
                    3. Drop the column in a later release.",
    example_snippet: Some(
        "-- Release 1: relax the column\n\
         ALTER TABLE users ALTER COLUMN legacy_field DROP NOT NULL;\n\n\
         -- Release 2: remove it\n\
         ALTER TABLE users DROP COLUMN legacy_field;",
    ),
};

fn sql_drop_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bDROP\s+COLUMN\b").expect("valid regex"))
}

fn django_remove_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bRemoveField\b").expect("valid regex"))
}

fn alembic_drop_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bop\.drop_column\b").expect("valid regex"))
}

/// Flags `DROP COLUMN`, Django `RemoveField` and Alembic `op.drop_column`
#[derive(Debug, Default, Clone, Copy)]
pub struct DropColumnRule;

impl LintRule for DropColumnRule {
    fn id(&self) -> RuleId {
        RuleId::DropColumn
    }

    fn description(&self) -> &'static str {
        "Detects DROP COLUMN operations that lose data and break running code"
    }

    fn evaluate(&self, record: &MigrationRecord) -> Vec<RuleViolation> {
        let surfaces = [
            (sql_drop_column(), "DROP COLUMN statement found"),
            (django_remove_field(), "Django RemoveField operation found"),
            (alembic_drop_column(), "Alembic op.drop_column() call found"),
        ];

        surfaces
            .into_iter()
            .flat_map(|(pattern, label)| scan::scan_all(record, pattern, label))
            .map(|hit| GUIDANCE.violation(record.display_path(), hit.message, Some(hit.line)))
            .collect()
    }
}

#[cfg(test)]
#[path = "drop_column_test.rs"]
mod tests;
