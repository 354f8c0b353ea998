//! `roibot ask` command - answer one prompt from the command line

use std::sync::Arc;
use std::time::Instant;

use crate::cli::Cli;
use crate::commands::{build_assistant, load_kb};
use roibot_core::assistant::Mode;
use roibot_core::config::ServerConfig;
use roibot_core::error::Result;
use roibot_core::format::OutputFormat;
use roibot_core::trace_time;

/// Execute the ask command
pub fn execute(cli: &Cli, config: &ServerConfig, prompt: &str, mode: Mode) -> Result<()> {
    let start = Instant::now();
    let kb = Arc::new(load_kb(config));
    let assistant = build_assistant(config, kb);

    let reply = assistant.respond(prompt, mode)?;
    trace_time!(start, "respond", path = reply.path.as_str());

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Human => {
            println!("{}", reply.text);
        }
    }

    Ok(())
}
