//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use mq_core::Framework;

/// MigrationIQ - Git-aware migration safety checks for Django and Alembic projects
#[derive(Parser, Debug)]
#[command(name = "migrationiq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the migration framework from the config file
    #[arg(short, long, global = true, value_enum)]
    pub framework: Option<FrameworkArg>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the migration graph and detect structural issues
    Check,

    /// Detect risky operations in migration files
    Lint,

    /// Compare migrations between the current branch and a target branch
    Compare(CompareArgs),

    /// Run the full pre-PR readiness check (check + lint + compare)
    Ready,

    /// Run the readiness check and enforce the risk threshold
    Protect(ProtectArgs),
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Target branch to compare against (default: target_branch from config)
    #[arg(short, long)]
    pub target: Option<String>,
}

/// Arguments for the protect command
#[derive(Args, Debug)]
pub struct ProtectArgs {
    /// Override the risk threshold from the config file
    #[arg(short = 'T', long)]
    pub threshold: Option<u32>,
}

/// Migration framework selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkArg {
    /// Detect from project layout
    Auto,
    /// Django `migrations/` packages
    Django,
    /// Alembic `versions/` scripts
    Alembic,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Auto => Framework::Auto,
            FrameworkArg::Django => Framework::Django,
            FrameworkArg::Alembic => Framework::Alembic,
        }
    }
}

/// Output formats shared by every command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
