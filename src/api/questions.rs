// Question endpoints. Same shape as the review ones, answered by sellers.

use super::{ApiError, ApiJson, AppState, ModerationCommand};
use crate::core::moderation::{AnswerTarget, ItemKey, Question};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

/// Identifies the question by all four of its fields, plus the seller's reply.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub product_id: String,
    pub user_id: String,
    pub query: String,
    pub seller_id: String,
    pub response: String,
}

impl AnswerRequest {
    fn into_parts(self) -> (AnswerTarget, String) {
        let target = AnswerTarget {
            product_id: self.product_id,
            user_id: self.user_id,
            query: self.query,
            seller_id: self.seller_id,
        };
        (target, self.response)
    }
}

/// `GET /questions`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.questions.snapshot()?))
}

/// `POST /questions`
pub async fn add(
    State(state): State<AppState>,
    ApiJson(question): ApiJson<Question>,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.questions.add(question)?;
    Ok((StatusCode::CREATED, "Question added"))
}

/// `POST /questions/answer`
pub async fn answer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnswerRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let (target, response) = request.into_parts();
    state.questions.append_response(&target, &response)?;
    Ok((StatusCode::CREATED, "Answer added"))
}

/// `POST /questions/flag`
pub async fn flag(
    State(state): State<AppState>,
    ApiJson(key): ApiJson<ItemKey>,
) -> Result<&'static str, ApiError> {
    state.questions.flag(&key)?;
    Ok("Question flagged")
}

/// `GET /questions/moderate`
pub async fn queue(State(state): State<AppState>) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.questions.flagged_queue()?))
}

/// `POST /questions/moderate`
pub async fn moderate(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<ModerationCommand>,
) -> Result<&'static str, ApiError> {
    let (key, action) = command.into_parts();
    state.questions.moderate(&key, action)?;
    Ok("Question moderated")
}
