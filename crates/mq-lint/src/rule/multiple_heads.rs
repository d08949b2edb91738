//! Detects a diverged migration graph

use super::{GraphRule, LintRule};
use crate::scan::GRAPH_FILE_PATH;
use crate::violation::{RuleId, RuleViolation, Severity};
use mq_core::{MigrationGraph, MigrationRecord};

/// Heads quoted in the example merge migration
const EXAMPLE_HEADS: usize = 3;

/// Flags a graph with more than one head.
///
/// This is a graph rule; evaluating a single migration never reports anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultipleHeadsRule;

impl MultipleHeadsRule {
    fn example_snippet(heads: &[String]) -> String {
        let quoted: Vec<String> = heads
            .iter()
            .take(EXAMPLE_HEADS)
            .map(|h| format!("'{h}'"))
            .collect();
        format!(
            "# Django merge migration:\n\
             class Migration(migrations.Migration):\n    \
             dependencies = [\n        \
             {},\n    \
             ]\n    \
             operations = []",
            quoted.join(", ")
        )
    }
}

impl LintRule for MultipleHeadsRule {
    fn id(&self) -> RuleId {
        RuleId::MultipleHeads
    }

    fn description(&self) -> &'static str {
        "Detects more than one head in the migration graph"
    }

    fn evaluate(&self, _record: &MigrationRecord) -> Vec<RuleViolation> {
        Vec::new()
    }
}

impl GraphRule for MultipleHeadsRule {
    fn id(&self) -> RuleId {
        RuleId::MultipleHeads
    }

    fn description(&self) -> &'static str {
        "Detects more than one head in the migration graph"
    }

    fn evaluate_graph(&self, graph: &MigrationGraph) -> Vec<RuleViolation> {
        let heads = graph.detect_multiple_heads();
        if heads.is_empty() {
            return Vec::new();
        }

        vec![RuleViolation {
            rule_id: RuleId::MultipleHeads,
            severity: Severity::Critical,
            file_path: GRAPH_FILE_PATH.to_string(),
            message: format!(
                "Migration graph has {} heads: {}",
                heads.len(),
                heads.join(", ")
            ),
            explanation: "The migration history has split into parallel branches. \
                          The migration runner cannot tell which order to apply them in."
                .to_string(),
            suggested_fix: "Create a merge migration that depends on every current head:\n  \
                            Django:  python manage.py makemigrations --merge\n  \
                            Alembic: alembic merge heads"
                .to_string(),
            example_snippet: Some(Self::example_snippet(&heads)),
            line_hint: None,
        }]
    }
}

#[cfg(test)]
#[path = "multiple_heads_test.rs"]
mod tests;
