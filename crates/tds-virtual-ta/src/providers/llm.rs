//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::Result;

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 400,
        }
    }
}

impl From<&LlmConfig> for GenerationParams {
    fn from(config: &LlmConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Trait for LLM-based text generation
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API (gemini-1.5-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a fully built prompt
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Whether a credential is available. Unconfigured providers are never called.
    fn is_configured(&self) -> bool;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
