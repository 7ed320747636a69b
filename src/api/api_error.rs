// HTTP error mapping - every failure leaves as `{"error": message}`.

use crate::core::moderation::FeedbackError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    /// The body was not JSON, or did not decode into the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Feedback(FeedbackError::Rejected { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Feedback(FeedbackError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Feedback(FeedbackError::LockPoisoned(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                StatusCode::BAD_REQUEST
            }
        };

        let body = match &self {
            ApiError::Feedback(FeedbackError::Rejected { reason }) => {
                json!({ "error": self.to_string(), "reason": reason })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// `axum::Json`, but decode failures go through `ApiError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
