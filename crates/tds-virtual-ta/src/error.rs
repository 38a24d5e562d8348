//! Error types for the virtual TA

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::response::{AnswerResult, Link};

/// Result type alias for virtual TA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Virtual TA errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Question text missing or blank
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// Gemini/LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Rate-limit store unreachable
    #[error("Rate limit store error: {0}")]
    RateLimitStore(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True when the error text reports an exhausted quota or HTTP 429
    pub fn is_quota_exceeded(&self) -> bool {
        let text = self.to_string();
        text.contains("429") || text.to_lowercase().contains("quota")
    }
}

/// Answer shown to callers that sent a blank question
pub const EMPTY_QUESTION_ANSWER: &str = "Please provide a question for the TDS Virtual TA.";
/// Answer shown to callers whose body is not the expected JSON
pub const INVALID_REQUEST_ANSWER: &str =
    "Invalid request format. Please send JSON with a \"question\" field.";
/// Answer shown when the request could not be handled at all
pub const INTERNAL_ERROR_ANSWER: &str = "An error occurred. Please try again.";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::EmptyQuestion => (
                StatusCode::BAD_REQUEST,
                AnswerResult::new(
                    EMPTY_QUESTION_ANSWER,
                    vec![Link::forum_home("TDS Course Forum")],
                ),
            ),
            Error::InvalidRequest(_) | Error::Json(_) => (
                StatusCode::BAD_REQUEST,
                AnswerResult::new(
                    INVALID_REQUEST_ANSWER,
                    vec![Link::forum_home("TDS Course Forum")],
                ),
            ),
            _ => {
                tracing::error!("API error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AnswerResult::new(INTERNAL_ERROR_ANSWER, vec![Link::forum_home("TDS Forum")]),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
