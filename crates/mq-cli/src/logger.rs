//! stderr logging for the library crates through `env_logger`

use log::{Level, LevelFilter};
use std::io::Write;

/// Module prefixes whose records are shown
const LOGGED_MODULES: &[&str] = &["mq_core", "mq_discover", "mq_engine", "mq_git", "mq_lint"];

/// Level used for a run: warnings only, or everything down to debug with `--verbose`
pub(crate) fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Line prefix for a record of `level`
pub(crate) fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "Error: ",
        Level::Warn => "Warning: ",
        _ => "[verbose] ",
    }
}

fn builder(verbose: bool) -> env_logger::Builder {
    let level = level_for(verbose);
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Off);
    for module in LOGGED_MODULES {
        builder.filter_module(module, level);
    }
    builder.format(|buf, record| writeln!(buf, "{}{}", prefix(record.level()), record.args()));
    builder
}

/// Install the logger. Later calls are ignored.
pub(crate) fn init(verbose: bool) {
    let _ = builder(verbose).try_init();
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod tests;
