//! Check command implementation

use anyhow::Result;
use mq_engine::CheckResult;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::common::{self, build_engine, exit_with, join_or_none, print_table};

/// Nodes listed per issue before the rest are elided
const MAX_NODES_SHOWN: usize = 5;

/// Execute the check command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let engine = build_engine(global)?;
    common::verbose(global, "Analysing migration graph");
    let result = engine.run_check();

    match global.output {
        OutputFormat::Json => common::print_json(&result)?,
        OutputFormat::Text => print_text(&result),
    }

    exit_with(result.exit_code())
}

fn print_text(result: &CheckResult) {
    println!("Discovered {} migration(s)", result.migrations.len());
    println!("Heads: {}", join_or_none(&result.heads));
    println!("Roots: {}", join_or_none(&result.roots));

    if result.graph_issues.is_empty() {
        println!();
        println!("Migration graph is clean - no issues detected.");
        return;
    }

    println!();
    let rows: Vec<Vec<String>> = result
        .graph_issues
        .iter()
        .map(|issue| {
            vec![
                issue.kind.to_string(),
                issue.severity.to_string().to_uppercase(),
                issue.description.clone(),
                format_nodes(&issue.nodes),
            ]
        })
        .collect();
    print_table(&["TYPE", "SEVERITY", "DESCRIPTION", "NODES"], &rows);

    println!();
    if result.has_critical() {
        println!("Critical issues found in migration graph.");
    } else {
        println!("Warnings found in migration graph.");
    }
}

fn format_nodes(nodes: &[String]) -> String {
    if nodes.len() > MAX_NODES_SHOWN {
        format!(
            "{} (+{} more)",
            nodes[..MAX_NODES_SHOWN].join(", "),
            nodes.len() - MAX_NODES_SHOWN
        )
    } else {
        nodes.join(", ")
    }
}
