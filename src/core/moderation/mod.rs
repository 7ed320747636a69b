// Core moderation module - the moderated, flaggable content store.
// Models, the banned-word filter, the generic item store and its read views.

pub mod banned_words;
pub mod content_item;
pub mod item_store;
pub mod moderation_models;
pub mod projections;

pub use banned_words::{BannedWordFilter, BannedWordSource, LoadError};
pub use item_store::{FeedbackError, ItemStore, NotFoundPolicy};
pub use moderation_models::*;
