// Review endpoints.

use super::{ApiError, ApiJson, AppState, ModerationCommand};
use crate::core::moderation::{CommentTarget, ItemKey, Review};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub product_id: String,
    pub user_id: String,
    pub text: String,
}

/// `GET /reviews`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.snapshot()?))
}

/// `POST /reviews`
pub async fn add(
    State(state): State<AppState>,
    ApiJson(review): ApiJson<Review>,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.reviews.add(review)?;
    Ok((StatusCode::CREATED, "Review added"))
}

/// `POST /reviews/comment`
pub async fn comment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let target = CommentTarget {
        product_id: request.product_id,
        user_id: request.user_id,
    };
    state.reviews.append_response(&target, &request.text)?;
    Ok((StatusCode::CREATED, "Comment added"))
}

/// `POST /reviews/flag`
pub async fn flag(
    State(state): State<AppState>,
    ApiJson(key): ApiJson<ItemKey>,
) -> Result<&'static str, ApiError> {
    state.reviews.flag(&key)?;
    Ok("Review flagged")
}

/// `GET /reviews/moderate`
pub async fn queue(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.flagged_queue()?))
}

/// `POST /reviews/moderate`
pub async fn moderate(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<ModerationCommand>,
) -> Result<&'static str, ApiError> {
    let (key, action) = command.into_parts();
    state.reviews.moderate(&key, action)?;
    Ok("Review moderated")
}
