//! mq-lint: rule-based linting of migration content
//!
//! Each rule scans one migration's raw source for risky operations in three
//! surface syntaxes (raw SQL, Django operations, Alembic `op.` calls). The
//! multiple-heads rule inspects the dependency graph instead.

pub(crate) mod engine;
pub(crate) mod rule;
pub(crate) mod scan;
pub(crate) mod violation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::RuleEngine;
pub use rule::drop_column::DropColumnRule;
pub use rule::drop_table::DropTableRule;
pub use rule::multiple_heads::MultipleHeadsRule;
pub use rule::non_null::NonNullRule;
pub use rule::type_change::TypeChangeRule;
pub use rule::{GraphRule, LintRule};
pub use scan::GRAPH_FILE_PATH;
pub use violation::{RuleId, RuleViolation, Severity};
