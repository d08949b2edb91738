use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_defaults() {
    let cli = Cli::try_parse_from(["migrationiq", "check"]).unwrap();
    assert!(!cli.global.verbose);
    assert_eq!(cli.global.project_dir, ".");
    assert_eq!(cli.global.config, None);
    assert_eq!(cli.global.framework, None);
    assert_eq!(cli.global.output, OutputFormat::Text);
    assert!(matches!(cli.command, Commands::Check));
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from([
        "migrationiq",
        "lint",
        "-p",
        "backend",
        "--framework",
        "alembic",
        "-o",
        "json",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.global.project_dir, "backend");
    assert_eq!(cli.global.framework, Some(FrameworkArg::Alembic));
    assert_eq!(cli.global.output, OutputFormat::Json);
    assert!(cli.global.verbose);
}

#[test]
fn test_compare_target() {
    let cli = Cli::try_parse_from(["migrationiq", "compare", "-t", "origin/develop"]).unwrap();
    match cli.command {
        Commands::Compare(args) => assert_eq!(args.target.as_deref(), Some("origin/develop")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_protect_threshold() {
    let cli = Cli::try_parse_from(["migrationiq", "protect", "-T", "12"]).unwrap();
    match cli.command {
        Commands::Protect(args) => assert_eq!(args.threshold, Some(12)),
        other => panic!("unexpected command: {other:?}"),
    }

    assert!(Cli::try_parse_from(["migrationiq", "protect", "-T", "-1"]).is_err());
}

#[test]
fn test_unknown_framework_rejected() {
    assert!(Cli::try_parse_from(["migrationiq", "check", "-f", "rails"]).is_err());
}

#[test]
fn test_framework_conversion() {
    assert_eq!(Framework::from(FrameworkArg::Auto), Framework::Auto);
    assert_eq!(Framework::from(FrameworkArg::Django), Framework::Django);
    assert_eq!(Framework::from(FrameworkArg::Alembic), Framework::Alembic);
}
