//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mq_core::Settings;
use mq_engine::{MigrationEngine, EXIT_OK};
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only, never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// `Ok` for a zero exit code, otherwise an [`ExitCode`] error
pub(crate) fn exit_with(code: i32) -> Result<()> {
    if code == EXIT_OK {
        Ok(())
    } else {
        Err(ExitCode(code).into())
    }
}

/// Print verbose output if enabled
pub(crate) fn verbose(global: &GlobalArgs, msg: &str) {
    if global.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Resolve settings for the project directory, applying the `--framework` override
pub(crate) fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let project_dir = Path::new(&global.project_dir);
    if !project_dir.is_dir() {
        anyhow::bail!("Project directory '{}' does not exist", global.project_dir);
    }

    let explicit = global.config.as_deref().map(Path::new);
    let mut settings =
        Settings::resolve(explicit, project_dir).context("Failed to load configuration")?;

    if let Some(framework) = global.framework {
        settings.framework = framework.into();
    }
    Ok(settings)
}

/// Build an engine for the project directory
pub(crate) fn build_engine(global: &GlobalArgs) -> Result<MigrationEngine> {
    let settings = load_settings(global)?;
    verbose(
        global,
        &format!(
            "Framework: {}, target branch: {}, migration dirs: {}",
            settings.framework,
            settings.target_branch,
            settings.migration_dirs.join(", ")
        ),
    );
    Ok(MigrationEngine::new(settings, &global.project_dir))
}

/// Print a value as pretty JSON to stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Width of each column: the longest of the header and every cell
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Prints a left-aligned header row, a separator line of dashes, and each
/// data row. Columns are separated by two spaces.
///
/// ```ignore
/// print_table(&["TYPE", "SEVERITY"], &[vec!["cycle".into(), "critical".into()]]);
/// // TYPE   SEVERITY
/// // -----  --------
/// // cycle  critical
/// ```
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

/// Comma-joined list, or `none` when empty
pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Print a section heading
pub(crate) fn print_heading(title: &str) {
    println!();
    println!("== {} ==", title);
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
