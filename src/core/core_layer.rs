// The core module contains all business logic.
// Nothing in here knows about HTTP or the filesystem.

#[path = "moderation/mod.rs"]
pub mod moderation;
