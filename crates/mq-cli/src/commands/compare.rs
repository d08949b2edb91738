//! Compare command implementation

use anyhow::Result;
use mq_engine::{EXIT_CRITICAL, EXIT_OK, EXIT_WARNING};
use mq_git::ComparisonReport;

use crate::cli::{CompareArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{self, build_engine, exit_with, print_table};

/// Execute the compare command
pub(crate) fn execute(args: &CompareArgs, global: &GlobalArgs) -> Result<()> {
    let engine = build_engine(global)?;
    let target = args
        .target
        .as_deref()
        .unwrap_or(engine.settings().target_branch.as_str());
    common::verbose(global, &format!("Comparing with {}", target));

    let report = match engine.run_compare(Some(target)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Comparison failed: {}", e);
            return exit_with(EXIT_CRITICAL);
        }
    };

    match global.output {
        OutputFormat::Json => common::print_json(&report)?,
        OutputFormat::Text => print_text(&report),
    }

    exit_with(if report.has_issues() {
        EXIT_WARNING
    } else {
        EXIT_OK
    })
}

fn print_text(report: &ComparisonReport) {
    println!("Current: {}", report.current_branch);
    println!("Target:  {}", report.target_branch);
    if report.is_behind {
        println!("Behind:  Yes ({} commits)", report.commits_behind);
    } else {
        println!("Behind:  No");
    }

    print_files("Migrations only on YOUR branch", &report.current_only);
    print_files("Migrations only on TARGET branch", &report.target_only);
    print_files("Parallel migrations (conflict risk)", &report.parallel_migrations);

    if !report.suggestions.is_empty() {
        common::print_heading("Suggestions");
        for suggestion in &report.suggestions {
            println!("  * {}", suggestion);
        }
    }

    println!();
    if report.has_issues() {
        println!("Migration divergence detected - review suggestions above.");
    } else {
        println!("No migration divergence detected.");
    }
}

fn print_files(title: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    common::print_heading(title);
    let rows: Vec<Vec<String>> = files.iter().map(|f| vec![f.clone()]).collect();
    print_table(&["FILE"], &rows);
}
