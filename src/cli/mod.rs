//! CLI argument parsing for roibot
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --kb, --config

pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use parse::{parse_mode, parse_output_format};
use roibot_core::assistant::Mode;
use roibot_core::format::OutputFormat;

/// Roibot - Value & ROI knowledge assistant
#[derive(Parser, Debug)]
#[command(name = "roibot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Knowledge base directory (defaults to the embedded seed KB)
    #[arg(long, global = true)]
    pub kb: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single prompt
    Ask {
        /// Free-text question or problem statement
        prompt: String,

        /// Answer mode (kb or hybrid)
        #[arg(long, value_parser = parse_mode, default_value = "hybrid")]
        mode: Mode,
    },

    /// Run the HTTP chat server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Allow hybrid requests to use the external fallback
        #[arg(long)]
        allow_external: bool,
    },

    /// Knowledge base commands
    Kb {
        #[command(subcommand)]
        command: KbCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum KbCommands {
    /// Show catalog counts
    Stats,

    /// Write the active knowledge base as JSON files
    Emit {
        /// Output directory (created if missing)
        #[arg(long)]
        out: PathBuf,
    },
}
