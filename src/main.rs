// This is the entry point of the product feedback service.
//
// **Architecture Overview:**
// - `core/` = Business logic (reviews, questions, moderation)
// - `infra/` = Implementations of core traits (banned-word file source)
// - `api/` = HTTP adapters (routes, handlers)
//
// This file's job is to:
// 1. Load configuration
// 2. Load the banned-word filter
// 3. Build the stores (dependency injection)
// 4. Serve HTTP

#[path = "api/api_layer.rs"]
mod api;
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::core::moderation::BannedWordFilter;
use crate::infra::banned_words::FileBannedWordSource;
use anyhow::Context;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // The filter must be fully loaded before any store exists; without it
    // the service does not start.
    let source = FileBannedWordSource::new(&config.banned_words_path);
    let filter = BannedWordFilter::load(&source)
        .await
        .context("Failed to load banned words")?;
    tracing::info!(
        path = %config.banned_words_path.display(),
        words = filter.word_count(),
        "Banned words loaded"
    );

    let state = AppState::new(Arc::new(filter), config.not_found_policy);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(
        addr = %config.bind_addr,
        not_found_policy = ?config.not_found_policy,
        "Product feedback service listening"
    );

    api::serve(listener, state).await.context("HTTP server failed")
}
