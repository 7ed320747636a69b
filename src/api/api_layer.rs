// HTTP layer - routes and handlers.
//
// This layer is THIN: decode the request, call the store, encode the result.
// Every rule lives in `core::moderation`.

pub mod api_error;
pub mod questions;
pub mod reviews;

pub use api_error::{ApiError, ApiJson};

use crate::core::moderation::{
    BannedWordFilter, ItemKey, ItemStore, ModerationAction, NotFoundPolicy,
    Question, Review,
};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<ItemStore<Review>>,
    pub questions: Arc<ItemStore<Question>>,
}

impl AppState {
    /// Both stores screen with the same filter but lock independently.
    pub fn new(filter: Arc<BannedWordFilter>, not_found: NotFoundPolicy) -> Self {
        Self {
            reviews: Arc::new(ItemStore::new(Arc::clone(&filter), not_found)),
            questions: Arc::new(ItemStore::new(filter, not_found)),
        }
    }
}

/// Body of every moderation POST. Unknown or missing actions decode fine
/// and do nothing.
#[derive(Debug, Deserialize)]
pub struct ModerationCommand {
    pub product_id: String,
    pub user_id: String,
    #[serde(default)]
    pub action: String,
}

impl ModerationCommand {
    pub fn into_parts(self) -> (ItemKey, ModerationAction) {
        let action = ModerationAction::from_wire(&self.action);
        (ItemKey::new(self.product_id, self.user_id), action)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reviews", get(reviews::list).post(reviews::add))
        .route("/reviews/comment", post(reviews::comment))
        .route("/reviews/flag", post(reviews::flag))
        .route(
            "/reviews/moderate",
            get(reviews::queue).post(reviews::moderate),
        )
        .route("/questions", get(questions::list).post(questions::add))
        .route("/questions/answer", post(questions::answer))
        .route("/questions/flag", post(questions::flag))
        .route(
            "/questions/moderate",
            get(questions::queue).post(questions::moderate),
        )
        .with_state(state)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

/// `GET /health` - liveness plus how many items sit in each moderation state.
async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.reviews.state_counts()?;
    let questions = state.questions.state_counts()?;
    Ok(Json(json!({
        "ok": true,
        "reviews": reviews,
        "questions": questions,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode as HttpStatus;
    use serde_json::Value;

    async fn spawn_app(words: &[&str], not_found: NotFoundPolicy) -> String {
        let filter = Arc::new(BannedWordFilter::from_lines(words.iter().copied()));
        let state = AppState::new(filter, not_found);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            serve(listener, state).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn review_body(product_id: &str, user_id: &str, comment: &str) -> Value {
        json!({
            "product_id": product_id,
            "user_id": user_id,
            "rating": 5,
            "comment": comment,
        })
    }

    #[tokio::test]
    async fn test_review_lifecycle_over_http() {
        let base = spawn_app(&["spam"], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/reviews"))
            .json(&review_body("P1", "U1", "great"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::CREATED);

        let res = client
            .post(format!("{base}/reviews/comment"))
            .json(&json!({ "product_id": "P1", "user_id": "U2", "text": "agreed" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::CREATED);

        let reviews: Value = client
            .get(format!("{base}/reviews"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(reviews.as_array().unwrap().len(), 1);
        assert_eq!(reviews[0]["comments"][0]["user_id"], "U2");
        assert_eq!(reviews[0]["comments"][0]["text"], "agreed");
        assert_eq!(reviews[0]["flagged"], false);

        let res = client
            .post(format!("{base}/reviews/flag"))
            .json(&json!({ "product_id": "P1", "user_id": "U1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::OK);

        let queue: Value = client
            .get(format!("{base}/reviews/moderate"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(queue.as_array().unwrap().len(), 1);

        let res = client
            .post(format!("{base}/reviews/moderate"))
            .json(&json!({ "product_id": "P1", "user_id": "U1", "action": "remove" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::OK);

        let reviews: Value = client
            .get(format!("{base}/reviews"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(reviews.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_banned_review_returns_400_with_reason() {
        let base = spawn_app(&["spam"], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/reviews"))
            .json(&review_body("P1", "U1", "this is SPAMtastic"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["reason"], "banned_words");

        let reviews: Value = client
            .get(format!("{base}/reviews"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(reviews.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_answer_and_approve() {
        let base = spawn_app(&[], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/questions"))
            .json(&json!({
                "product_id": "P1",
                "user_id": "U1",
                "seller_id": "S1",
                "query": "Does it ship abroad?",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::CREATED);

        let res = client
            .post(format!("{base}/questions/answer"))
            .json(&json!({
                "product_id": "P1",
                "user_id": "U1",
                "query": "Does it ship abroad?",
                "seller_id": "S1",
                "response": "Yes, worldwide",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::CREATED);

        client
            .post(format!("{base}/questions/flag"))
            .json(&json!({ "product_id": "P1", "user_id": "U1" }))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{base}/questions/moderate"))
            .json(&json!({ "product_id": "P1", "user_id": "U1", "action": "approve" }))
            .send()
            .await
            .unwrap();

        let questions: Value = client
            .get(format!("{base}/questions"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(questions[0]["answers"][0]["response"], "Yes, worldwide");
        assert_eq!(questions[0]["flagged"], true);
        assert_eq!(questions[0]["moderated"], true);

        let queue: Value = client
            .get(format!("{base}/questions/moderate"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(queue.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action_and_missing_item_succeed_silently() {
        let base = spawn_app(&[], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/reviews/moderate"))
            .json(&json!({ "product_id": "P1", "user_id": "U1", "action": "archive" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::OK);

        let res = client
            .post(format!("{base}/questions/flag"))
            .json(&json!({ "product_id": "P404", "user_id": "U1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::OK);
    }

    #[tokio::test]
    async fn test_strict_mode_returns_404() {
        let base = spawn_app(&[], NotFoundPolicy::Strict).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/reviews/flag"))
            .json(&json!({ "product_id": "P404", "user_id": "U1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let base = spawn_app(&[], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/reviews"))
            .json(&json!({ "product_id": "P1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("user_id"));

        let res = client
            .post(format!("{base}/reviews/flag"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_moderation_without_action_is_a_noop() {
        let base = spawn_app(&[], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        client
            .post(format!("{base}/reviews"))
            .json(&review_body("P1", "U1", "fine"))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{base}/reviews/flag"))
            .json(&json!({ "product_id": "P1", "user_id": "U1" }))
            .send()
            .await
            .unwrap();

        let res = client
            .post(format!("{base}/reviews/moderate"))
            .json(&json!({ "product_id": "P1", "user_id": "U1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatus::OK);

        let queue: Value = client
            .get(format!("{base}/reviews/moderate"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(queue.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health_reports_state_counts() {
        let base = spawn_app(&[], NotFoundPolicy::Silent).await;
        let client = reqwest::Client::new();

        client
            .post(format!("{base}/reviews"))
            .json(&review_body("P1", "U1", "fine"))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{base}/reviews/flag"))
            .json(&json!({ "product_id": "P1", "user_id": "U1" }))
            .send()
            .await
            .unwrap();

        let health: Value = client
            .get(format!("{base}/health"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["ok"], true);
        assert_eq!(health["reviews"]["total"], 1);
        assert_eq!(health["reviews"]["flagged"], 1);
        assert_eq!(health["questions"]["total"], 0);
    }
}
