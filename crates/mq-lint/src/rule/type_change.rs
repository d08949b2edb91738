//! Detects column type changes

use super::LintRule;
use crate::scan;
use crate::violation::{Guidance, RuleId, RuleViolation, Severity};
use mq_core::MigrationRecord;
use regex::Regex;
use std::sync::OnceLock;

const GUIDANCE: Guidance = Guidance {
    rule_id: RuleId::TypeChange,
    severity: Severity::Warning,
    explanation: "Changing a column type can silently truncate or corrupt values. \
                  On large tables the rewrite can hold an exclusive lock for a long time.",
    suggested_fix: "1. Add a new column with the target type.\n\
                    2. Back-fill it with an explicit cast.\n\
                    3. Switch application code to the new column.\n\
                    4. Drop the old column in a later release.",
    example_snippet: Some(
        "-- Instead of:\n\
         --   ALTER TABLE orders ALTER COLUMN amount TYPE INTEGER;\n\
         ALTER TABLE orders ADD COLUMN amount_new INTEGER;\n\
         UPDATE orders SET amount_new = amount::INTEGER;\n\
         ALTER TABLE orders DROP COLUMN amount;\n\
         ALTER TABLE orders RENAME COLUMN amount_new TO amount;",
    ),
};

fn sql_alter_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bALTER\s+COLUMN\s+\w+\s+(?:SET\s+DATA\s+)?TYPE\b").expect("valid regex")
    })
}

fn django_alter_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bAlterField\b").expect("valid regex"))
}

fn alembic_alter_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bop\.alter_column\b").expect("valid regex"))
}

fn alembic_type_param() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btype_\s*=").expect("valid regex"))
}

/// Flags column type changes.
///
/// Every Django `AlterField` is reported since the new field definition may
/// change the type. Alembic `op.alter_column` is only reported when it passes
/// `type_=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeChangeRule;

impl LintRule for TypeChangeRule {
    fn id(&self) -> RuleId {
        RuleId::TypeChange
    }

    fn description(&self) -> &'static str {
        "Detects column type changes that can lose data or lock tables"
    }

    fn evaluate(&self, record: &MigrationRecord) -> Vec<RuleViolation> {
        let mut hits = scan::scan_all(record, sql_alter_type(), "ALTER COLUMN TYPE statement found");
        hits.extend(scan::scan_all(
            record,
            django_alter_field(),
            "Django AlterField operation found, may change the column type",
        ));
        hits.extend(scan::scan(
            record,
            alembic_alter_column(),
            "Alembic op.alter_column() with type_ parameter",
            |_, window| alembic_type_param().is_match(window),
        ));

        hits.into_iter()
            .map(|hit| GUIDANCE.violation(record.display_path(), hit.message, Some(hit.line)))
            .collect()
    }
}

#[cfg(test)]
#[path = "type_change_test.rs"]
mod tests;
