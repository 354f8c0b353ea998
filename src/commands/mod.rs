//! CLI commands for roibot

pub mod ask;
pub mod dispatch;
pub mod kb;
pub mod serve;

use std::sync::Arc;

use crate::cli::Cli;
use roibot_core::assistant::{Assistant, GeminiClient};
use roibot_core::catalog::KnowledgeBase;
use roibot_core::config::ServerConfig;
use roibot_core::error::Result;

/// Resolve configuration from file and environment, then apply global flags
pub fn resolve_config(cli: &Cli) -> Result<ServerConfig> {
    let mut config = ServerConfig::resolve(cli.config.as_deref())?;
    if let Some(kb) = &cli.kb {
        config.kb_dir = Some(kb.clone());
    }
    Ok(config)
}

/// Load the configured KB directory, or the embedded seed KB
pub fn load_kb(config: &ServerConfig) -> KnowledgeBase {
    match &config.kb_dir {
        Some(dir) => KnowledgeBase::load_dir(dir),
        None => KnowledgeBase::seed(),
    }
}

/// Assistant over `kb` with the configured external policy and fallback client
pub fn build_assistant(config: &ServerConfig, kb: Arc<KnowledgeBase>) -> Assistant {
    let assistant = Assistant::new(kb).allow_external(config.allow_external);
    match GeminiClient::from_config(&config.fallback) {
        Some(client) => assistant.with_fallback(Box::new(client)),
        None => assistant,
    }
}
