//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Maskwise using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Maskwise - PII annotation and redaction overlay
#[derive(Parser, Debug)]
#[command(name = "maskwise")]
#[command(version, about, long_about = None)]
#[command(author = "Maskwise Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "maskwise.toml", env = "MASKWISE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MASKWISE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Highlight or mask PII in documents
    Analyze(commands::analyze::AnalyzeArgs),

    /// Replace PII in a prompt with realistic stand-ins
    Protect(commands::protect::ProtectArgs),

    /// Show the risk tier for a set of PII types
    Classify(commands::classify::ClassifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::analyze::OutputView;

    #[test]
    fn test_cli_parse_analyze() {
        let cli = Cli::parse_from(["maskwise", "analyze", "notes.txt"]);
        assert_eq!(cli.config, "maskwise.toml");
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.inputs.len(), 1);
                assert_eq!(args.view, OutputView::Highlighted);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_analyze_view() {
        let cli = Cli::parse_from(["maskwise", "analyze", "--view", "masked", "--fail-on-pii"]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.view, OutputView::Masked);
                assert!(args.fail_on_pii);
                assert!(args.inputs.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_view() {
        assert!(Cli::try_parse_from(["maskwise", "analyze", "--view", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["maskwise", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["maskwise", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_protect() {
        let cli = Cli::parse_from(["maskwise", "protect", "--seed", "42", "--alternatives", "2"]);
        match cli.command {
            Commands::Protect(args) => {
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.alternatives, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["maskwise", "classify", "SSN,PERSON"]);
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.types, "SSN,PERSON"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
