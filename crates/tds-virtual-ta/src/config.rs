//! Configuration for the virtual TA

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main virtual TA configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VirtualTaConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Throttle in front of the LLM
    #[serde(default)]
    pub throttle: ThrottleConfig,
    /// Context retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl VirtualTaConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    ///
    /// Recognised variables: `GEMINI_API_KEY`, `GEMINI_MODEL`, `TDS_TA_HOST`, `TDS_TA_PORT`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections fall back to defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.llm.model = model;
        }
        if let Some(host) = lookup("TDS_TA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TDS_TA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid TDS_TA_PORT '{}': {}", port, e)))?;
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes (default: 16MB, room for a 10MB image in base64)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_body_size: 16 * 1024 * 1024,
        }
    }
}

/// Gemini (Generative Language API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; unset or empty disables generation
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Output token cap
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// API key if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            temperature: 0.7,
            max_output_tokens: 400,
            timeout_secs: 30,
        }
    }
}

/// Minimum-interval throttle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum gap between two LLM calls
    pub min_interval_secs: u64,
    /// Expiry of the stored last-call timestamp
    pub ttl_secs: u64,
    /// Fixed delay used when the timestamp store is unavailable
    pub fallback_delay_secs: u64,
}

impl ThrottleConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_secs(self.fallback_delay_secs)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 5,
            ttl_secs: 60,
            fallback_delay_secs: 2,
        }
    }
}

/// Context retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum snippets per context bundle
    pub max_snippets: usize,
    /// Characters of context placed in the prompt
    pub prompt_context_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_snippets: 3,
            prompt_context_chars: 500,
        }
    }
}
