//! Ready command implementation

use anyhow::Result;
use mq_engine::ReadyResult;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::common::{self, build_engine, exit_with, print_table};

/// Execute the ready command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let engine = build_engine(global)?;
    common::verbose(global, "Running full readiness check");
    let result = engine.run_ready();

    match global.output {
        OutputFormat::Json => common::print_json(&result)?,
        OutputFormat::Text => print_report(&result),
    }

    exit_with(result.exit_code())
}

/// Human-readable report shared with `protect`
pub(crate) fn print_report(result: &ReadyResult) {
    common::print_heading("Migration Graph Check");
    println!("  Migrations discovered: {}", result.check.migrations.len());
    println!("  Graph issues: {}", result.check.graph_issues.len());
    for issue in &result.check.graph_issues {
        println!(
            "    [{}] {}",
            issue.severity.to_string().to_uppercase(),
            issue.description
        );
    }

    common::print_heading("Migration Lint");
    println!("  Violations: {}", result.lint.violations.len());
    for v in &result.lint.violations {
        println!("    [{}] {}", v.severity.to_string().to_uppercase(), v.message);
    }

    if let Some(compare) = &result.compare {
        common::print_heading("Branch Comparison");
        println!("  Current: {}", compare.current_branch);
        println!("  Target:  {}", compare.target_branch);
        println!("  Behind:  {}", if compare.is_behind { "Yes" } else { "No" });
        if !compare.parallel_migrations.is_empty() {
            println!(
                "  Parallel migrations: {}",
                compare.parallel_migrations.len()
            );
        }
        for suggestion in &compare.suggestions {
            println!("    * {}", suggestion);
        }
    }

    if !result.risk.passed() {
        common::print_heading("Risk Breakdown");
        let rows: Vec<Vec<String>> = result
            .risk
            .findings()
            .iter()
            .map(|f| {
                vec![
                    f.category.clone(),
                    f.score.to_string(),
                    f.description.clone(),
                    f.file_path.clone().unwrap_or_default(),
                ]
            })
            .collect();
        print_table(&["CATEGORY", "SCORE", "DESCRIPTION", "FILE"], &rows);
    }
    println!();
    println!(
        "Risk score: {} ({})",
        result.risk.total_score(),
        result.risk.severity()
    );
}
