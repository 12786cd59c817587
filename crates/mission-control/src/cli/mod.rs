//! Command-line interface for mission-control.
//!
//! This module provides the CLI structure for the `mission-control` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{BreakpointArg, ConfigCommand, LayoutCommand, ServeCommand};

/// mission-control - Your personal dashboard, served locally
///
/// Serves the dashboard page and its small JSON API from a single directory.
/// Run without a subcommand to start the server with default settings.
#[derive(Debug, Parser)]
#[command(name = "mission-control")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the dashboard server
    Serve(ServeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run responsive layout checks against recorded snapshots
    #[command(subcommand)]
    Layout(LayoutCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "mission-control");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["mission-control"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let args = ["mission-control", "serve", "--port", "9000", "--root", "/srv"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Serve(cmd)) => {
                assert_eq!(cmd.port, Some(9000));
                assert_eq!(cmd.root, Some(PathBuf::from("/srv")));
                assert!(cmd.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_layout_simulate() {
        let args = ["mission-control", "layout", "simulate", "snaps.json", "-b", "desktop"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Layout(LayoutCommand::Simulate {
                breakpoint: BreakpointArg::Desktop,
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["mission-control", "-c", "/custom/config.toml", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Some(Command::Config(ConfigCommand::Path))));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["mission-control", "-vv", "serve"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
