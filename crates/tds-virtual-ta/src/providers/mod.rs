//! Provider abstractions for the external language model
//!
//! The pipeline talks to the model through [`LlmProvider`] so the Gemini
//! client can be swapped for a stub in tests.

pub mod gemini;
pub mod llm;

pub use gemini::GeminiClient;
pub use llm::{GenerationParams, LlmProvider};
