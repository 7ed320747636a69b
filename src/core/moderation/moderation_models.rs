// Moderation domain models - reviews, questions and their response threads.
//
// These are pure domain types with no HTTP dependencies.
// Field names match the JSON shapes exchanged at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ITEMS
// ============================================================================

/// A buyer's review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub product_id: String,
    pub user_id: String,
    pub rating: i64,
    /// The review body. Screened against the banned-word filter on submission.
    pub comment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub moderated: bool,
}

/// A reply appended to a review's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: String,
    pub text: String,
    /// Unix seconds, assigned when the comment is appended.
    pub timestamp: i64,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub moderated: bool,
}

/// A pre-sale question addressed to a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub product_id: String,
    pub user_id: String,
    pub seller_id: String,
    pub query: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub moderated: bool,
}

/// A seller's reply appended to a question's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub seller_id: String,
    pub response: String,
    pub timestamp: i64,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub moderated: bool,
}

// ============================================================================
// MATCH KEYS
// ============================================================================
// Keys locate the first matching item in store order. Nothing enforces
// uniqueness, so duplicates after the first are never touched.

/// Anything that can be used to look an item up by product.
pub trait MatchKey: fmt::Debug + Send + Sync {
    fn product_id(&self) -> &str;
}

/// The (product, author) pair used by flag and moderate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKey {
    pub product_id: String,
    pub user_id: String,
}

impl ItemKey {
    pub fn new(product_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl MatchKey for ItemKey {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

/// Where a comment goes. Only `product_id` takes part in matching;
/// `user_id` is the comment's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    pub product_id: String,
    pub user_id: String,
}

impl MatchKey for CommentTarget {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

/// Where an answer goes. All four fields must match, since a product can
/// carry many questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTarget {
    pub product_id: String,
    pub user_id: String,
    pub query: String,
    pub seller_id: String,
}

impl MatchKey for AnswerTarget {
    fn product_id(&self) -> &str {
        &self.product_id
    }
}

// ============================================================================
// MODERATION
// ============================================================================

/// A moderator's decision on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Remove,
    /// Anything else. Applying it is a no-op, not an error.
    Unrecognized,
}

impl ModerationAction {
    /// Parse the wire value (`"approve"` / `"remove"`). Matching is exact.
    pub fn from_wire(action: &str) -> Self {
        match action {
            "approve" => ModerationAction::Approve,
            "remove" => ModerationAction::Remove,
            _ => ModerationAction::Unrecognized,
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationAction::Approve => write!(f, "approve"),
            ModerationAction::Remove => write!(f, "remove"),
            ModerationAction::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Where an item sits in the flag -> moderate lifecycle.
///
/// `Removed` has no variant: removed items are simply absent from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    Clean,
    Flagged,
    Approved,
}

impl ModerationState {
    pub fn from_flags(flagged: bool, moderated: bool) -> Self {
        match (flagged, moderated) {
            (_, true) => ModerationState::Approved,
            (true, false) => ModerationState::Flagged,
            (false, false) => ModerationState::Clean,
        }
    }

    /// True for items waiting on a moderator.
    pub fn is_queued(self) -> bool {
        self == ModerationState::Flagged
    }
}
