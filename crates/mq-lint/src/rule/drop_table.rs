//! Detects dropped tables

use super::LintRule;
use crate::scan;
use crate::violation::{Guidance, RuleId, RuleViolation, Severity};
use mq_core::MigrationRecord;
use regex::Regex;
use std::sync::OnceLock;

const GUIDANCE: Guidance = Guidance {
    rule_id: RuleId::DropTable,
    severity: Severity::Critical,
    explanation: "Dropping a table permanently deletes every row it holds. \
                  Once applied in production there is no way back short of a restore.",
    suggested_fix: "1. Rename the table instead of dropping it.\n\
                    2. Keep it around for a deprecation period.\n\
                    3. Back up the data before the final drop.\n\
                    4. Do the drop in a separate, later migration.",
    example_snippet: Some(
        "-- Instead of:\n\
         --   DROP TABLE users;\n\
         ALTER TABLE users RENAME TO users_deprecated;\n\
         -- Drop it in a later release once nothing reads it.",
    ),
};

fn sql_drop_table() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bDROP\s+TABLE\b").expect("valid regex"))
}

fn django_delete_model() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bDeleteModel\b|\bRemoveModel\b").expect("valid regex"))
}

fn alembic_drop_table() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bop\.drop_table\b").expect("valid regex"))
}

/// Flags `DROP TABLE`, Django `DeleteModel`/`RemoveModel` and Alembic `op.drop_table`
#[derive(Debug, Default, Clone, Copy)]
pub struct DropTableRule;

impl LintRule for DropTableRule {
    fn id(&self) -> RuleId {
        RuleId::DropTable
    }

    fn description(&self) -> &'static str {
        "Detects DROP TABLE operations, which irreversibly delete data"
    }

    fn evaluate(&self, record: &MigrationRecord) -> Vec<RuleViolation> {
        let surfaces = [
            (sql_drop_table(), "DROP TABLE statement found"),
            (django_delete_model(), "Django DeleteModel/RemoveModel operation found"),
            (alembic_drop_table(), "Alembic op.drop_table() call found"),
        ];

        surfaces
            .into_iter()
            .flat_map(|(pattern, label)| scan::scan_all(record, pattern, label))
            .map(|hit| GUIDANCE.violation(record.display_path(), hit.message, Some(hit.line)))
            .collect()
    }
}

#[cfg(test)]
#[path = "drop_table_test.rs"]
mod tests;
