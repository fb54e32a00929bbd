//! Unit tests for CLI parsing

use crate::cli::{Cli, Commands, LogFormatArg};
use crate::logging::LogFormat;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["plainrouter", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            addr,
            log_level,
            log_format,
        } => {
            // PLAINROUTER_ADDR is not set in the test environment
            if std::env::var("PLAINROUTER_ADDR").is_err() {
                assert_eq!(addr, "0.0.0.0:8080");
            }
            assert!(log_level.is_none());
            assert!(log_format.is_none());
        }
        Commands::Routes => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_with_flags() {
    let cli = Cli::try_parse_from([
        "plainrouter",
        "serve",
        "--addr",
        "127.0.0.1:9000",
        "--log-level",
        "debug",
        "--log-format",
        "pretty",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve {
            addr,
            log_level,
            log_format,
        } => {
            assert_eq!(addr, "127.0.0.1:9000");
            assert_eq!(log_level.as_deref(), Some("debug"));
            assert_eq!(log_format, Some(LogFormatArg::Pretty));
            assert_eq!(LogFormat::from(LogFormatArg::Pretty), LogFormat::Pretty);
        }
        Commands::Routes => panic!("Expected Serve command"),
    }
}

#[test]
fn test_routes_command() {
    let cli = Cli::try_parse_from(["plainrouter", "routes"]).unwrap();
    assert!(matches!(cli.command, Commands::Routes));
}

#[test]
fn test_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["plainrouter", "serve", "--log-format", "xml"]).is_err());
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(["plainrouter"]).is_err());
}
