// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "banned_words/mod.rs"]
pub mod banned_words;
