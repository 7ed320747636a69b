// The contract every moderated item kind implements so one store can hold it.

use super::moderation_models::{
    Answer, AnswerTarget, Comment, CommentTarget, ItemKey, MatchKey, ModerationState, Question,
    Review,
};

/// A top-level item that can be screened, threaded, flagged and moderated.
pub trait ContentItem: Clone + Send + Sync + 'static {
    /// Identifies which item a new response belongs to.
    type ResponseTarget: MatchKey;

    /// Human-readable kind, used in logs and errors.
    const KIND: &'static str;

    fn product_id(&self) -> &str;
    fn user_id(&self) -> &str;

    /// The text screened by the banned-word filter when the item is added.
    fn primary_text(&self) -> &str;

    fn is_flagged(&self) -> bool;
    fn is_moderated(&self) -> bool;
    fn mark_flagged(&mut self);
    fn mark_moderated(&mut self);

    /// Reset everything the server owns before the item is stored:
    /// moderation flags, the response thread and any server timestamps.
    fn prepare_for_insert(&mut self, now: i64);

    fn accepts_response(&self, target: &Self::ResponseTarget) -> bool;
    fn push_response(&mut self, target: &Self::ResponseTarget, text: String, timestamp: i64);
    fn response_count(&self) -> usize;

    fn has_identity(&self, key: &ItemKey) -> bool {
        self.product_id() == key.product_id && self.user_id() == key.user_id
    }

    fn moderation_state(&self) -> ModerationState {
        ModerationState::from_flags(self.is_flagged(), self.is_moderated())
    }
}

impl ContentItem for Review {
    type ResponseTarget = CommentTarget;

    const KIND: &'static str = "review";

    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn primary_text(&self) -> &str {
        &self.comment
    }

    fn is_flagged(&self) -> bool {
        self.flagged
    }

    fn is_moderated(&self) -> bool {
        self.moderated
    }

    fn mark_flagged(&mut self) {
        self.flagged = true;
    }

    fn mark_moderated(&mut self) {
        self.moderated = true;
    }

    fn prepare_for_insert(&mut self, _now: i64) {
        self.comments.clear();
        self.flagged = false;
        self.moderated = false;
    }

    // Reviews are matched on product alone: the first review of the product
    // receives the comment.
    fn accepts_response(&self, target: &CommentTarget) -> bool {
        self.product_id == target.product_id
    }

    fn push_response(&mut self, target: &CommentTarget, text: String, timestamp: i64) {
        self.comments.push(Comment {
            user_id: target.user_id.clone(),
            text,
            timestamp,
            flagged: false,
            moderated: false,
        });
    }

    fn response_count(&self) -> usize {
        self.comments.len()
    }
}

impl ContentItem for Question {
    type ResponseTarget = AnswerTarget;

    const KIND: &'static str = "question";

    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn primary_text(&self) -> &str {
        &self.query
    }

    fn is_flagged(&self) -> bool {
        self.flagged
    }

    fn is_moderated(&self) -> bool {
        self.moderated
    }

    fn mark_flagged(&mut self) {
        self.flagged = true;
    }

    fn mark_moderated(&mut self) {
        self.moderated = true;
    }

    fn prepare_for_insert(&mut self, now: i64) {
        self.timestamp = now;
        self.answers.clear();
        self.flagged = false;
        self.moderated = false;
    }

    fn accepts_response(&self, target: &AnswerTarget) -> bool {
        self.product_id == target.product_id
            && self.user_id == target.user_id
            && self.query == target.query
            && self.seller_id == target.seller_id
    }

    fn push_response(&mut self, target: &AnswerTarget, text: String, timestamp: i64) {
        self.answers.push(Answer {
            seller_id: target.seller_id.clone(),
            response: text,
            timestamp,
            flagged: false,
            moderated: false,
        });
    }

    fn response_count(&self) -> usize {
        self.answers.len()
    }
}
