//! Startup configuration from environment variables

use crate::llm::ChatModel;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuration for the completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Base URL of an `OpenAI`-compatible API, without `/chat/completions`
    pub base_url: String,
    pub default_model: ChatModel,
    /// Upper bound on a single completion call
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: ChatModel::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub llm: LlmConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_or("LLM_TIMEOUT_SECS", get("LLM_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
        // A zero timeout would fail every completion before it is sent
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LLM_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        let default_model = match get("DEFAULT_MODEL") {
            None => ChatModel::default(),
            Some(id) => ChatModel::from_id(&id).unwrap_or_else(|| {
                tracing::warn!(model = %id, "DEFAULT_MODEL is not an allowed model, ignoring");
                ChatModel::default()
            }),
        };

        Ok(Self {
            port,
            llm: LlmConfig {
                api_key: get("OPENAI_API_KEY").unwrap_or_default(),
                base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                default_model,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
