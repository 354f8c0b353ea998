//! Command dispatch logic for roibot
use std::time::Instant;

use crate::cli::{Cli, Commands, KbCommands};
use crate::commands;
use roibot_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let mut config = commands::resolve_config(cli)?;

    tracing::debug!(elapsed = ?start.elapsed(), kb_dir = ?config.kb_dir, "resolve_config");

    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Ask { prompt, mode }) => commands::ask::execute(cli, &config, prompt, *mode),

        Some(Commands::Serve {
            port,
            host,
            allow_external,
        }) => {
            if let Some(port) = port {
                config.port = *port;
            }
            if let Some(host) = host {
                config.host = host.clone();
            }
            if *allow_external {
                config.allow_external = true;
            }
            commands::serve::execute(&config)
        }

        Some(Commands::Kb { command }) => match command {
            KbCommands::Stats => commands::kb::execute_stats(cli, &config),
            KbCommands::Emit { out } => commands::kb::execute_emit(cli, &config, out),
        },
    }
}

fn handle_no_command() -> Result<()> {
    println!("roibot {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("A Value & ROI knowledge assistant.");
    println!();
    println!("Run `roibot --help` for usage information.");
    Ok(())
}
