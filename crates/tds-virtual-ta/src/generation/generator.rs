//! Throttled answer generation

use std::sync::Arc;

use crate::generation::prompt::PromptBuilder;
use crate::knowledge::ContextBundle;
use crate::providers::{GenerationParams, LlmProvider};
use crate::throttle::Throttle;

/// Calls the LLM for one question. Returns `None` instead of failing.
pub struct AnswerGenerator {
    provider: Arc<dyn LlmProvider>,
    throttle: Throttle,
    params: GenerationParams,
    context_chars: usize,
}

impl AnswerGenerator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        throttle: Throttle,
        params: GenerationParams,
        context_chars: usize,
    ) -> Self {
        Self {
            provider,
            throttle,
            params,
            context_chars,
        }
    }

    /// Generate raw answer text, or `None` when the model is unconfigured,
    /// fails, or returns nothing
    pub async fn generate(
        &self,
        question: &str,
        context: &ContextBundle,
        image_context: &str,
    ) -> Option<String> {
        if !self.provider.is_configured() {
            tracing::debug!("{} has no credential, skipping generation", self.provider.name());
            return None;
        }

        self.throttle.wait().await;

        let prompt = PromptBuilder::build_answer_prompt(
            question,
            &context.to_string(),
            image_context,
            self.context_chars,
        );

        match self.provider.generate(&prompt, &self.params).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!("{} returned an empty answer", self.provider.name());
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(e) => {
                tracing::error!("{} API error: {}", self.provider.name(), e);
                if e.is_quota_exceeded() {
                    tracing::warn!("{} quota exceeded", self.provider.name());
                }
                None
            }
        }
    }
}
