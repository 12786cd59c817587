//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use mission_control_layout::Breakpoint;

use crate::config::Config;

/// Serve command arguments.
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Host name or address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the dashboard and data files
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl ServeCommand {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(root) = &self.root {
            config.server.root.clone_from(root);
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Responsive layout check commands.
#[derive(Debug, Subcommand)]
pub enum LayoutCommand {
    /// Evaluate a recorded layout snapshot (or an array of them)
    Check {
        /// JSON file with the snapshot(s)
        snapshot: PathBuf,
    },

    /// Replay recorded snapshots through a simulated breakpoint change
    Simulate {
        /// JSON file with an array of snapshots, one per viewport width
        snapshots: PathBuf,

        /// Breakpoint to simulate
        #[arg(short, long, value_enum, default_value = "mobile")]
        breakpoint: BreakpointArg,
    },
}

/// Breakpoint argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BreakpointArg {
    /// 375px wide
    Mobile,
    /// 768px wide
    Tablet,
    /// 1280px wide
    Desktop,
}

impl From<BreakpointArg> for Breakpoint {
    fn from(arg: BreakpointArg) -> Self {
        match arg {
            BreakpointArg::Mobile => Self::Mobile,
            BreakpointArg::Tablet => Self::Tablet,
            BreakpointArg::Desktop => Self::Desktop,
        }
    }
}
