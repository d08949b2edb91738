//! Rule registry and runner

use crate::rule::drop_column::DropColumnRule;
use crate::rule::drop_table::DropTableRule;
use crate::rule::multiple_heads::MultipleHeadsRule;
use crate::rule::non_null::NonNullRule;
use crate::rule::type_change::TypeChangeRule;
use crate::rule::{GraphRule, LintRule};
use crate::violation::{RuleId, RuleViolation};
use mq_core::{MigrationGraph, MigrationRecord, RulesConfig};
use std::cmp::Reverse;

/// Holds the registered rules and runs them over a set of migrations
pub struct RuleEngine {
    record_rules: Vec<Box<dyn LintRule>>,
    graph_rules: Vec<Box<dyn GraphRule>>,
}

impl RuleEngine {
    /// Create an engine with every built-in rule registered
    pub fn with_defaults() -> Self {
        Self::from_config(&RulesConfig::default())
    }

    /// Create an engine with the rules enabled by `rules`.
    ///
    /// Type-change and multiple-heads cannot be turned off.
    pub fn from_config(rules: &RulesConfig) -> Self {
        let mut record_rules: Vec<Box<dyn LintRule>> = Vec::new();
        if !rules.allow_drop_table {
            record_rules.push(Box::new(DropTableRule));
        }
        if !rules.allow_drop_column {
            record_rules.push(Box::new(DropColumnRule));
        }
        if rules.require_two_step_non_null {
            record_rules.push(Box::new(NonNullRule));
        }
        record_rules.push(Box::new(TypeChangeRule));

        Self {
            record_rules,
            graph_rules: vec![Box::new(MultipleHeadsRule)],
        }
    }

    /// Run every rule, returning violations with the most severe first.
    ///
    /// Record rules run first, each over all records in order, then graph
    /// rules. The final sort is stable so violations of equal severity keep
    /// that order.
    pub fn run(&self, records: &[MigrationRecord], graph: &MigrationGraph) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for rule in &self.record_rules {
            for record in records {
                violations.extend(rule.evaluate(record));
            }
        }

        for rule in &self.graph_rules {
            violations.extend(rule.evaluate_graph(graph));
        }

        violations.sort_by_key(|v| Reverse(v.severity));
        violations
    }

    /// Identifiers of the registered rules, record rules first
    pub fn rule_ids(&self) -> Vec<RuleId> {
        let mut ids: Vec<_> = self.record_rules.iter().map(|r| r.id()).collect();
        ids.extend(self.graph_rules.iter().map(|r| r.id()));
        ids
    }

    /// Names of the registered rules, record rules first
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rule_ids().iter().map(RuleId::as_str).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
