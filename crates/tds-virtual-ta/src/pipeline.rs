//! The question-answering pipeline
//!
//! Retrieval, image description, generation and composition run strictly in
//! order. Each stage is total; a panic anywhere is caught here and turned into
//! the emergency fallback, so [`VirtualTa::answer`] always returns a payload.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use crate::config::VirtualTaConfig;
use crate::error::Result;
use crate::generation::{compose, emergency_fallback, AnswerGenerator};
use crate::image;
use crate::knowledge::{ContextRetriever, KnowledgeBase};
use crate::providers::{GeminiClient, GenerationParams, LlmProvider};
use crate::throttle::{InMemoryRateLimitStore, RateLimitStore, Throttle};
use crate::types::{question::Question, response::AnswerResult};

/// Virtual teaching assistant
pub struct VirtualTa {
    retriever: ContextRetriever,
    generator: AnswerGenerator,
}

impl VirtualTa {
    pub fn new(retriever: ContextRetriever, generator: AnswerGenerator) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    /// Gemini-backed assistant with a process-local throttle store
    pub fn from_config(config: &VirtualTaConfig) -> Result<Self> {
        let provider = Arc::new(GeminiClient::new(&config.llm)?);
        tracing::info!(
            "LLM provider: {} ({}, {})",
            provider.name(),
            provider.model(),
            if provider.is_configured() {
                "configured"
            } else {
                "no API key, rule-based answers only"
            }
        );
        Ok(Self::with_provider(
            config,
            provider,
            Arc::new(InMemoryRateLimitStore::new()),
        ))
    }

    /// Assistant with injected model provider and throttle store
    pub fn with_provider(
        config: &VirtualTaConfig,
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn RateLimitStore>,
    ) -> Self {
        let retriever = ContextRetriever::new(KnowledgeBase::tds(), config.retrieval.max_snippets);
        let generator = AnswerGenerator::new(
            provider,
            Throttle::new(store, &config.throttle),
            GenerationParams::from(&config.llm),
            config.retrieval.prompt_context_chars,
        );
        Self::new(retriever, generator)
    }

    /// Answer a question. Never fails.
    pub async fn answer(&self, question: &Question) -> AnswerResult {
        let start = Instant::now();

        let result = AssertUnwindSafe(self.run(question))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                tracing::error!("Unified service error: {}", panic_message(panic.as_ref()));
                emergency_fallback()
            });

        tracing::info!(
            "Answered in {}ms, {} links",
            start.elapsed().as_millis(),
            result.links.len()
        );

        result
    }

    async fn run(&self, question: &Question) -> AnswerResult {
        let context = self.retriever.retrieve(question.text());

        let image_context = question.image().map(image::describe).unwrap_or_default();

        let ai_text = self
            .generator
            .generate(question.text(), &context, &image_context)
            .await;

        compose(ai_text.as_deref(), question.text(), &context)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::fallback::EMERGENCY_ANSWER;
    use crate::generation::generator::tests::ScriptedLlm;
    use crate::generation::QuestionTopic;
    use async_trait::async_trait;

    struct PanickingLlm;

    #[async_trait]
    impl LlmProvider for PanickingLlm {
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
            panic!("provider blew up");
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "panicking"
        }

        fn model(&self) -> &str {
            "none"
        }
    }

    fn assistant(provider: Arc<dyn LlmProvider>) -> VirtualTa {
        VirtualTa::with_provider(
            &VirtualTaConfig::default(),
            provider,
            Arc::new(InMemoryRateLimitStore::new()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_python_setup_without_ai() {
        let ta = assistant(Arc::new(ScriptedLlm::unconfigured()));
        let question = Question::new("How do I set up Python for TDS?").unwrap();

        let result = ta.answer(&question).await;

        assert!(result.answer.contains("venv"));
        assert!(!result.links.is_empty());
        assert_eq!(
            result.links[0].url,
            "https://discourse.onlinedegree.iitm.ac.in/t/python-setup/156001"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_error_falls_back_to_rules() {
        let llm = Arc::new(ScriptedLlm::failing("429 quota exceeded"));
        let ta = assistant(llm.clone());
        let question = Question::new("Which openai model should GA5 use?").unwrap();

        let result = ta.answer(&question).await;

        assert_eq!(llm.calls(), 1);
        assert!(result.answer.ends_with(QuestionTopic::ModelApi.guidance()));
        assert_eq!(
            result.links[0].url,
            "https://discourse.onlinedegree.iitm.ac.in/t/ga5-question-8-clarification/155939/4"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_answer_used() {
        let llm = Arc::new(ScriptedLlm::replying(
            "Activate the environment with source tds_env/bin/activate.",
        ));
        let ta = assistant(llm);
        let question = Question::new("How do I activate my venv?").unwrap();

        let result = ta.answer(&question).await;

        assert_eq!(
            result.answer,
            "Activate the environment with source tds_env/bin/activate."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_description_reaches_prompt() {
        let llm = Arc::new(ScriptedLlm::replying("That is a stack trace from pip."));
        let ta = assistant(llm.clone());
        let question = Question::new("What is this error?")
            .unwrap()
            .with_image("iVBORw0KGgo=");

        ta.answer(&question).await;

        let prompts = llm.prompts.lock();
        assert!(prompts[0].contains("Image provided (PNG, 8 bytes)."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_panic_becomes_emergency_fallback() {
        let ta = assistant(Arc::new(PanickingLlm));
        let question = Question::new("Anything at all?").unwrap();

        let result = ta.answer(&question).await;

        assert_eq!(result.answer, EMERGENCY_ANSWER);
        assert_eq!(result.links.len(), 1);
    }

    #[test]
    fn test_from_config_without_key() {
        assert!(VirtualTa::from_config(&VirtualTaConfig::default()).is_ok());
    }
}
