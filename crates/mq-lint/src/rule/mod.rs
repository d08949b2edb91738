//! Rule traits and the built-in rules

use crate::violation::{RuleId, RuleViolation};
use mq_core::{MigrationGraph, MigrationRecord};

pub(crate) mod drop_column;
pub(crate) mod drop_table;
pub(crate) mod multiple_heads;
pub(crate) mod non_null;
pub(crate) mod type_change;

/// A rule evaluated against one migration's content
pub trait LintRule: Send + Sync {
    /// Stable rule identifier
    fn id(&self) -> RuleId;

    /// One-line description of what the rule detects
    fn description(&self) -> &'static str;

    /// Scan a single migration. Returns no violations when nothing matches.
    fn evaluate(&self, record: &MigrationRecord) -> Vec<RuleViolation>;
}

/// A rule evaluated against the whole dependency graph
pub trait GraphRule: Send + Sync {
    fn id(&self) -> RuleId;

    fn description(&self) -> &'static str;

    fn evaluate_graph(&self, graph: &MigrationGraph) -> Vec<RuleViolation>;
}
