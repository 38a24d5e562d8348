//! Answer generation with the LLM and the fallback chain

pub mod compose;
pub mod fallback;
pub mod generator;
pub mod links;
pub mod prompt;

pub use compose::{clean_text, compose, synthesize_answer, QuestionTopic};
pub use fallback::emergency_fallback;
pub use generator::AnswerGenerator;
pub use links::extract_links;
pub use prompt::PromptBuilder;
