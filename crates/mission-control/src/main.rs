//! `mission-control` - CLI for the mission-control dashboard server
//!
//! This binary serves the dashboard and its JSON API, inspects configuration,
//! and runs responsive layout checks against recorded snapshots.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use mission_control::cli::{Cli, Command, ConfigCommand, LayoutCommand, ServeCommand};
use mission_control::{init_logging, server, AppState, Config, Error};
use mission_control_layout::{parse_snapshots, run_checks, simulate_breakpoint, ReplayProbe};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = match Config::load_from(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        None => handle_serve(config, &ServeCommand::default()).await,
        Some(Command::Serve(serve_cmd)) => handle_serve(config, &serve_cmd).await,
        Some(Command::Config(config_cmd)) => handle_config(&config, config_cmd),
        Some(Command::Layout(layout_cmd)) => handle_layout(layout_cmd).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(Error::AddressInUse { port, .. }) => {
                    eprintln!("{}", server::address_in_use_help(*port));
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn handle_serve(mut config: Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    cmd.apply(&mut config);
    config.validate()?;

    let listener = server::bind(&config).await?;
    let addr = listener.local_addr()?;
    println!("{}", server::banner(&config, addr));

    server::serve(listener, AppState::new(&config)).await?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Listen address:     {}", config.listen_addr());
                println!("  Root:               {}", config.root().display());
                println!("  Dashboard:          {}", config.dashboard_path().display());
                println!();
                println!("[Files]");
                println!("  Projects:           {}", config.projects_path().display());
                println!("  Activity:           {}", config.activity_path().display());
                println!("  Saved data:         {}", config.saved_data_path().display());
                println!();
                println!("[Activity]");
                println!("  Max entries:        {}", config.activity.max_entries);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

async fn handle_layout(cmd: LayoutCommand) -> anyhow::Result<()> {
    match cmd {
        LayoutCommand::Check { snapshot } => {
            let snapshots = read_snapshots(&snapshot)?;
            let mut failures = 0;
            for (i, snap) in snapshots.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let report = run_checks(snap);
                if !report.all_passed() {
                    failures += 1;
                }
                println!("{report}");
            }
            if failures > 0 {
                anyhow::bail!("{failures} of {} snapshot(s) failed checks", snapshots.len());
            }
        }
        LayoutCommand::Simulate {
            snapshots,
            breakpoint,
        } => {
            let mut probe = ReplayProbe::new(read_snapshots(&snapshots)?)?;
            let report = simulate_breakpoint(&mut probe, breakpoint.into()).await?;
            println!("{report}");
        }
    }
    Ok(())
}

fn read_snapshots(path: &Path) -> anyhow::Result<Vec<mission_control_layout::LayoutSnapshot>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_snapshots(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
