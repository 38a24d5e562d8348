//! Ask endpoint

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    question::{AskRequest, Question},
    response::AnswerResult,
};

/// POST /api - answer a student question
///
/// The body is parsed by hand so malformed JSON and unreadable or oversized
/// bodies get the answer-shaped 400 instead of axum's plain-text rejection.
pub async fn ask(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<AnswerResult>> {
    let body = body.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Error::InvalidRequest(rejection.body_text())
    })?;

    let request: AskRequest =
        serde_json::from_slice(&body).map_err(|e| Error::InvalidRequest(e.to_string()))?;

    let question = Question::try_from(request)?;

    tracing::info!(
        "Question: \"{}\"{}",
        question.text(),
        if question.image().is_some() { " (with image)" } else { "" }
    );

    let virtual_ta = state.virtual_ta();
    let result = tokio::spawn(async move { virtual_ta.answer(&question).await })
        .await
        .map_err(|e| Error::internal(format!("Answer task failed: {}", e)))?;

    Ok(Json(result))
}
