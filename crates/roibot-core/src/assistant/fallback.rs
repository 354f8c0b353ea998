//! External LLM fallback used when the knowledge base has no answer

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::FallbackConfig;
use crate::error::{Result, RoiError};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Generates free-form text for prompts the knowledge base cannot answer
pub trait FallbackProvider: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Google Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    timeout: Duration,
    user_agent: String,
}

impl GeminiClient {
    /// Build a client, or `None` when no API key is configured
    pub fn from_config(config: &FallbackConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        Some(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: format!("roibot/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model)
    }
}

impl FallbackProvider for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = request_body(prompt);

        let response = ureq::post(&self.endpoint())
            .set("Content-Type", "application/json")
            .set("User-Agent", &self.user_agent)
            .set("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .send_json(body);

        match response {
            Ok(res) => {
                let value: Value = res
                    .into_json()
                    .map_err(|e| RoiError::Fallback(format!("invalid response body: {}", e)))?;
                Ok(response_text(&value))
            }
            Err(ureq::Error::Status(code, _)) => {
                Err(RoiError::Fallback(format!("HTTP {}", code)))
            }
            Err(ureq::Error::Transport(e)) => {
                Err(RoiError::Fallback(format!("transport error: {}", e)))
            }
        }
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            { "role": "user", "parts": [ { "text": prompt } ] }
        ]
    })
}

/// Concatenated text parts of the first candidate; empty when absent
fn response_text(value: &Value) -> String {
    value["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}
