//! Detects NOT NULL columns added without a default

use super::LintRule;
use crate::scan;
use crate::violation::{Guidance, RuleId, RuleViolation, Severity};
use mq_core::MigrationRecord;
use regex::Regex;
use std::sync::OnceLock;

const GUIDANCE: Guidance = Guidance {
    rule_id: RuleId::NonNullWithoutDefault,
    severity: Severity::Error,
    explanation: "Adding a NOT NULL column with no default fails on any table that already \
                  has rows, because existing rows have no value for the new column.",
    suggested_fix: "Split the change into steps:\n\
                    1. Add the column as nullable, or with a default.\n\
                    2. Back-fill existing rows.\n\
                    3. Set NOT NULL in a separate migration.",
    example_snippet: Some(
        "-- Step 1\n\
         ALTER TABLE users ADD COLUMN role VARCHAR(50) DEFAULT 'member';\n\
         -- Step 2\n\
         UPDATE users SET role = 'member' WHERE role IS NULL;\n\
         -- Step 3\n\
         ALTER TABLE users ALTER COLUMN role SET NOT NULL;",
    ),
};

/// `ADD COLUMN <name> <type>` up to the end of its clause.
///
/// A clause ends at `;` or at a `,` outside parentheses, so `NUMERIC(10, 2)`
/// stays in one clause.
fn sql_add_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bADD\s+COLUMN\s+\w+\s+\w+(?:\([^)]*\)|[^;,(])*").expect("valid regex")
    })
}

fn sql_not_null() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bNOT\s+NULL\b").expect("valid regex"))
}

fn sql_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bDEFAULT\b").expect("valid regex"))
}

fn django_add_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bAddField\b").expect("valid regex"))
}

fn django_null_false() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bnull\s*=\s*False\b").expect("valid regex"))
}

fn django_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bdefault\s*=").expect("valid regex"))
}

fn alembic_add_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bop\.add_column\b").expect("valid regex"))
}

fn alembic_nullable_false() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bnullable\s*=\s*False\b").expect("valid regex"))
}

fn alembic_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:server_)?default\s*=").expect("valid regex"))
}

/// Flags non-nullable columns added without a default value.
///
/// Raw SQL is checked per `ADD COLUMN` clause: one with `NOT NULL` and no
/// `DEFAULT` anywhere in the clause. Django `AddField` and Alembic
/// `op.add_column` calls are checked within a fixed window after the call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonNullRule;

impl LintRule for NonNullRule {
    fn id(&self) -> RuleId {
        RuleId::NonNullWithoutDefault
    }

    fn description(&self) -> &'static str {
        "Detects ADD COLUMN NOT NULL without a DEFAULT, which fails on populated tables"
    }

    fn evaluate(&self, record: &MigrationRecord) -> Vec<RuleViolation> {
        let mut hits = scan::scan(
            record,
            sql_add_column(),
            "ADD COLUMN NOT NULL without DEFAULT",
            |clause, _| {
                sql_not_null().is_match(clause) && !sql_default().is_match(clause)
            },
        );
        hits.extend(scan::scan(
            record,
            django_add_field(),
            "Django AddField with null=False and no default",
            |_, window| django_null_false().is_match(window) && !django_default().is_match(window),
        ));
        hits.extend(scan::scan(
            record,
            alembic_add_column(),
            "Alembic op.add_column() with nullable=False and no default",
            |_, window| {
                alembic_nullable_false().is_match(window) && !alembic_default().is_match(window)
            },
        ));

        hits.into_iter()
            .map(|hit| GUIDANCE.violation(record.display_path(), hit.message, Some(hit.line)))
            .collect()
    }
}

#[cfg(test)]
#[path = "non_null_test.rs"]
mod tests;
