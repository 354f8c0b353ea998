//! Server and assistant configuration
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. environment variables
//! 4. CLI flags (applied by the binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_FALLBACK_TIMEOUT_SECONDS: u64 = 30;

/// Origins allowed to call the chat endpoint from a browser
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://app.pendo.io",
    "https://pendo-roi.vercel.app",
    "http://localhost:3000",
];

const ENV_HOST: &str = "ROIBOT_HOST";
const ENV_PORT: &str = "PORT";
const ENV_ALLOW_EXTERNAL: &str = "ALLOW_EXTERNAL";
const ENV_KB_DIR: &str = "ROIBOT_KB_DIR";
const ENV_ALLOWED_ORIGINS: &str = "ROIBOT_ALLOWED_ORIGINS";
const ENV_API_KEY: &str = "GEMINI_API_KEY";
const ENV_MODEL: &str = "GENAI_MODEL";
const ENV_FALLBACK_TIMEOUT: &str = "ROIBOT_FALLBACK_TIMEOUT";

/// Every environment variable [`ServerConfig::apply_env_from`] reads
pub const ENV_KEYS: &[&str] = &[
    ENV_HOST,
    ENV_PORT,
    ENV_ALLOW_EXTERNAL,
    ENV_KB_DIR,
    ENV_ALLOWED_ORIGINS,
    ENV_API_KEY,
    ENV_MODEL,
    ENV_FALLBACK_TIMEOUT,
];

/// External LLM fallback settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// API key; the fallback is unconfigured without one
    pub api_key: Option<String>,
    pub model: String,
    /// Request timeout, clamped to 5..=300 seconds
    pub timeout_seconds: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_FALLBACK_TIMEOUT_SECONDS,
        }
    }
}

impl FallbackConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Permit hybrid mode to reach the external fallback
    pub allow_external: bool,
    /// KB directory; the embedded seed KB is used when unset
    pub kb_dir: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
    pub fallback: FallbackConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allow_external: false,
            kb_dir: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RoiError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut config: ServerConfig = toml::from_str(&content)?;
        config.fallback.timeout_seconds = config.fallback.timeout_seconds.clamp(5, 300);
        Ok(config)
    }

    /// Defaults, overlaid with an optional file, overlaid with the process environment
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = get(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| RoiError::invalid_value("port", &port))?;
        }

        if let Some(allow) = get(ENV_ALLOW_EXTERNAL) {
            self.allow_external = allow.trim().eq_ignore_ascii_case("true");
        }

        if let Some(dir) = get(ENV_KB_DIR) {
            self.kb_dir = Some(PathBuf::from(dir));
        }

        if let Some(origins) = get(ENV_ALLOWED_ORIGINS) {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(key) = get(ENV_API_KEY) {
            self.fallback.api_key = Some(key);
        }

        if let Some(model) = get(ENV_MODEL) {
            self.fallback.model = model;
        }

        if let Some(timeout) = get(ENV_FALLBACK_TIMEOUT) {
            if let Ok(seconds) = timeout.trim().parse::<u64>() {
                self.fallback.timeout_seconds = seconds.clamp(5, 300);
            }
        }

        Ok(())
    }
}
