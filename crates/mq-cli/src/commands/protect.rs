//! Protect command implementation

use anyhow::Result;
use mq_engine::ProtectResult;

use crate::cli::{GlobalArgs, OutputFormat, ProtectArgs};
use crate::commands::common::{self, build_engine, exit_with};
use crate::commands::ready;

/// Execute the protect command
pub(crate) fn execute(args: &ProtectArgs, global: &GlobalArgs) -> Result<()> {
    let engine = build_engine(global)?;
    common::verbose(global, "Running protection check");
    let result = engine.run_protect(args.threshold);

    match global.output {
        OutputFormat::Json => common::print_json(&result)?,
        OutputFormat::Text => print_text(&result),
    }

    exit_with(result.exit_code())
}

fn print_text(result: &ProtectResult) {
    ready::print_report(&result.ready);

    common::print_heading("Protection Gate");
    println!("  Risk score: {}", result.ready.risk.total_score());
    println!("  Threshold:  {}", result.threshold);
    println!(
        "  Status:     {}",
        if result.exceeds_threshold() {
            "EXCEEDED"
        } else {
            "PASSED"
        }
    );

    println!();
    if result.exceeds_threshold() {
        println!(
            "Risk score {} exceeds threshold {}. Merge blocked.",
            result.ready.risk.total_score(),
            result.threshold
        );
    } else {
        println!("Risk score within threshold. Safe to merge.");
    }
}
