//! Lint command implementation

use anyhow::Result;
use mq_engine::LintResult;
use mq_lint::{RuleViolation, Severity};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::common::{self, build_engine, exit_with};

/// Execute the lint command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let engine = build_engine(global)?;
    common::verbose(
        global,
        &format!("Linting with rules: {}", engine.rules().rule_names().join(", ")),
    );
    let result = engine.run_lint();

    match global.output {
        OutputFormat::Json => common::print_json(&result)?,
        OutputFormat::Text => print_text(&result),
    }

    exit_with(result.exit_code())
}

/// Violations grouped by file, files in order of their first violation
pub(crate) fn group_by_file(violations: &[RuleViolation]) -> Vec<(&str, Vec<&RuleViolation>)> {
    let mut groups: Vec<(&str, Vec<&RuleViolation>)> = Vec::new();
    for violation in violations {
        let file = if violation.file_path.is_empty() {
            "<unknown>"
        } else {
            violation.file_path.as_str()
        };
        match groups.iter_mut().find(|(path, _)| *path == file) {
            Some((_, group)) => group.push(violation),
            None => groups.push((file, vec![violation])),
        }
    }
    groups
}

fn print_text(result: &LintResult) {
    if result.violations.is_empty() {
        println!("All migrations passed lint checks - no risky operations found.");
        return;
    }

    for (file, violations) in group_by_file(&result.violations) {
        println!("{}  ({} issue(s))", file, violations.len());
        for v in violations {
            println!("  [{}] {}", v.severity.to_string().to_uppercase(), v.message);
            if let Some(line) = v.line_hint {
                println!("    Line ~{}", line);
            }
            println!("    Why risky: {}", v.explanation);
            println!("    Suggested fix: {}", v.suggested_fix);
            if let Some(snippet) = &v.example_snippet {
                println!("    Example:");
                for line in snippet.lines() {
                    println!("      {}", line);
                }
            }
            println!();
        }
    }

    println!(
        "Total: {}  Critical: {}  Error: {}  Warning: {}",
        result.violations.len(),
        result.count(Severity::Critical),
        result.count(Severity::Error),
        result.count(Severity::Warning)
    );
}

#[cfg(test)]
#[path = "lint_test.rs"]
mod tests;
