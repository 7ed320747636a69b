// Item store - the lock-protected collection behind reviews and questions.
//
// One store holds one item kind. Every operation, reads included, takes the
// same exclusive lock for its whole duration, so each call is atomic with
// respect to every other call on that store. Lookups are linear scans and
// always act on the first match in insertion order.
//
// Banned-word screening runs before the lock is taken, and logging runs after
// it is released.

use super::banned_words::BannedWordFilter;
use super::content_item::ContentItem;
use super::moderation_models::{ItemKey, MatchKey, ModerationAction};
use super::projections::{moderation_queue, StateCounts};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Reason attached to submissions refused by the banned-word filter.
pub const BANNED_WORDS_REASON: &str = "banned_words";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Submission rejected: {reason}")]
    Rejected { reason: &'static str },

    #[error("No {kind} found for product {product_id}")]
    NotFound {
        kind: &'static str,
        product_id: String,
    },

    #[error("The {0} store lock was poisoned")]
    LockPoisoned(&'static str),
}

// ============================================================================
// CONFIG
// ============================================================================

/// What flag, moderate and append-response do when nothing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// Report success without touching anything (legacy behavior).
    #[default]
    Silent,
    /// Return `FeedbackError::NotFound`.
    Strict,
}

// ============================================================================
// STORE
// ============================================================================

pub struct ItemStore<T: ContentItem> {
    items: Mutex<Vec<T>>,
    filter: Arc<BannedWordFilter>,
    not_found: NotFoundPolicy,
}

impl<T: ContentItem> ItemStore<T> {
    /// Create an empty store that screens writes with `filter`.
    pub fn new(filter: Arc<BannedWordFilter>, not_found: NotFoundPolicy) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            filter,
            not_found,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<T>>, FeedbackError> {
        self.items
            .lock()
            .map_err(|_| FeedbackError::LockPoisoned(T::KIND))
    }

    fn screen(&self, text: &str) -> Result<(), FeedbackError> {
        if self.filter.contains(text) {
            tracing::warn!(kind = T::KIND, "Submission rejected by banned-word filter");
            return Err(FeedbackError::Rejected {
                reason: BANNED_WORDS_REASON,
            });
        }
        Ok(())
    }

    /// Turn a missed lookup into the configured outcome.
    fn resolve_miss(&self, key: &impl MatchKey, operation: &str) -> Result<(), FeedbackError> {
        match self.not_found {
            NotFoundPolicy::Silent => {
                tracing::debug!(kind = T::KIND, ?key, operation, "No matching item, ignoring");
                Ok(())
            }
            NotFoundPolicy::Strict => {
                tracing::warn!(kind = T::KIND, ?key, operation, "No matching item");
                Err(FeedbackError::NotFound {
                    kind: T::KIND,
                    product_id: key.product_id().to_string(),
                })
            }
        }
    }

    /// Append a new item after screening its primary text.
    ///
    /// Every new item starts clean with an empty thread, whatever the caller sent.
    pub fn add(&self, mut item: T) -> Result<(), FeedbackError> {
        self.screen(item.primary_text())?;

        item.prepare_for_insert(Utc::now().timestamp());
        let product_id = item.product_id().to_string();
        let user_id = item.user_id().to_string();

        let total = {
            let mut items = self.lock()?;
            items.push(item);
            items.len()
        };

        tracing::info!(kind = T::KIND, %product_id, %user_id, total, "Item added");
        Ok(())
    }

    /// Append a response to the first item accepting `target`.
    ///
    /// The timestamp is taken while the lock is held, so a thread's
    /// timestamps never decrease.
    pub fn append_response(
        &self,
        target: &T::ResponseTarget,
        text: &str,
    ) -> Result<(), FeedbackError> {
        self.screen(text)?;

        let thread_len = {
            let mut items = self.lock()?;
            items
                .iter_mut()
                .find(|item| item.accepts_response(target))
                .map(|item| {
                    item.push_response(target, text.to_string(), Utc::now().timestamp());
                    item.response_count()
                })
        };

        match thread_len {
            Some(thread_len) => {
                tracing::info!(kind = T::KIND, ?target, thread_len, "Response appended");
                Ok(())
            }
            None => self.resolve_miss(target, "append_response"),
        }
    }

    /// Flag the first item matching `key` for moderator attention.
    pub fn flag(&self, key: &ItemKey) -> Result<(), FeedbackError> {
        let found = {
            let mut items = self.lock()?;
            match items.iter_mut().find(|item| item.has_identity(key)) {
                Some(item) => {
                    item.mark_flagged();
                    true
                }
                None => false,
            }
        };

        if !found {
            return self.resolve_miss(key, "flag");
        }

        tracing::info!(
            kind = T::KIND,
            product_id = %key.product_id,
            user_id = %key.user_id,
            "Item flagged"
        );
        Ok(())
    }

    /// Apply a moderator decision to the first item matching `key`.
    ///
    /// `Remove` deletes the item and its thread; the remaining items keep
    /// their relative order. `Unrecognized` leaves the item untouched.
    pub fn moderate(&self, key: &ItemKey, action: ModerationAction) -> Result<(), FeedbackError> {
        let found = {
            let mut items = self.lock()?;
            match items.iter().position(|item| item.has_identity(key)) {
                Some(index) => {
                    match action {
                        ModerationAction::Approve => items[index].mark_moderated(),
                        ModerationAction::Remove => {
                            items.remove(index);
                        }
                        ModerationAction::Unrecognized => {}
                    }
                    true
                }
                None => false,
            }
        };

        if !found {
            return self.resolve_miss(key, "moderate");
        }

        tracing::info!(
            kind = T::KIND,
            product_id = %key.product_id,
            user_id = %key.user_id,
            %action,
            "Item moderated"
        );
        Ok(())
    }

    /// Copies of every item, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<T>, FeedbackError> {
        Ok(self.lock()?.clone())
    }

    /// Copies of the items waiting on a moderator, in insertion order.
    pub fn flagged_queue(&self) -> Result<Vec<T>, FeedbackError> {
        let items = self.lock()?;
        Ok(moderation_queue(items.iter()))
    }

    pub fn state_counts(&self) -> Result<StateCounts, FeedbackError> {
        let items = self.lock()?;
        Ok(StateCounts::tally(items.iter()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
