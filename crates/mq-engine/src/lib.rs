//! mq-engine: ties discovery, graph analysis, linting, branch comparison and
//! risk scoring together behind one entry point per command.

pub(crate) mod engine;
pub(crate) mod result;

pub use engine::MigrationEngine;
pub use result::{
    CheckResult, LintResult, ProtectResult, ReadyResult, EXIT_CRITICAL, EXIT_OK, EXIT_WARNING,
};
