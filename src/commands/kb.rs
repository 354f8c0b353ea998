//! `roibot kb` commands - inspect and export the knowledge base

use std::path::Path;

use serde_json::json;

use crate::cli::Cli;
use crate::commands::load_kb;
use roibot_core::config::ServerConfig;
use roibot_core::error::Result;
use roibot_core::format::OutputFormat;

/// Execute `kb stats`
pub fn execute_stats(cli: &Cli, config: &ServerConfig) -> Result<()> {
    let counts = load_kb(config).counts();

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        OutputFormat::Human => {
            let source = config
                .kb_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "embedded seed".to_string());
            if !cli.quiet {
                println!("Knowledge base: {}", source);
            }
            println!("problems: {}", counts.problems);
            println!("synonyms: {}", counts.synonyms);
            println!("levers:   {}", counts.levers);
            println!("stories:  {}", counts.stories);
        }
    }

    Ok(())
}

/// Execute `kb emit`
pub fn execute_emit(cli: &Cli, config: &ServerConfig, out: &Path) -> Result<()> {
    let kb = load_kb(config);
    let counts = kb.write_dir(out)?;

    tracing::info!(out_dir = %out.display(), "kb_emitted");

    match cli.format {
        OutputFormat::Json => {
            let output = json!({
                "ok": true,
                "outDir": out.display().to_string(),
                "counts": {
                    "problemToUseCases": counts.problems,
                    "problemSynonyms": counts.synonyms,
                    "leverCatalog": counts.levers,
                    "customerStories": counts.stories,
                }
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Wrote knowledge base to {} ({} problems, {} synonyms, {} levers, {} stories)",
                    out.display(),
                    counts.problems,
                    counts.synonyms,
                    counts.levers,
                    counts.stories
                );
            }
        }
    }

    Ok(())
}
