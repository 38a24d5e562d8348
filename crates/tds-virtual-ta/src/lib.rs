//! tds-virtual-ta: question answering for the Tools in Data Science course
//!
//! A request flows through four stages: keyword retrieval over an embedded
//! knowledge base, optional image description, a throttled Gemini call, and
//! response composition with rule-based and emergency fallbacks. The
//! [`pipeline::VirtualTa`] ties the stages together and never fails; the
//! [`server`] module exposes it over HTTP.

pub mod config;
pub mod error;
pub mod generation;
pub mod image;
pub mod knowledge;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod throttle;
pub mod types;

pub use config::VirtualTaConfig;
pub use error::{Error, Result};
pub use pipeline::VirtualTa;
pub use types::{
    question::{AskRequest, Question},
    response::{AnswerResult, Link},
};
