//! MigrationIQ CLI - git-aware migration safety checks for Django and Alembic

use anyhow::Result;
use clap::Parser;
use mq_engine::EXIT_CRITICAL;

mod cli;
mod commands;
mod logger;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{check, compare, lint, protect, ready};

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check => check::execute(&cli.global),
        Commands::Lint => lint::execute(&cli.global),
        Commands::Compare(args) => compare::execute(args, &cli.global),
        Commands::Ready => ready::execute(&cli.global),
        Commands::Protect(args) => protect::execute(args, &cli.global),
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.global.verbose);

    if let Err(err) = run(&cli) {
        let code = match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => *code,
            None => {
                eprintln!("Error: {:#}", err);
                EXIT_CRITICAL
            }
        };
        std::process::exit(code);
    }
}
