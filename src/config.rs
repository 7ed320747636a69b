// Runtime configuration, read from environment variables (and `.env`).

use crate::core::moderation::NotFoundPolicy;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BANNED_WORDS_PATH: &str = "banned_words.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `BANNED_WORDS_PATH`
    pub banned_words_path: PathBuf,
    /// `STRICT_NOT_FOUND=true` selects `NotFoundPolicy::Strict`.
    pub not_found_policy: NotFoundPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            banned_words_path: PathBuf::from(DEFAULT_BANNED_WORDS_PATH),
            not_found_policy: NotFoundPolicy::Silent,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key -> value lookup. Unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr:?}"))?;

        let banned_words_path = lookup("BANNED_WORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BANNED_WORDS_PATH));

        let strict = match lookup("STRICT_NOT_FOUND") {
            Some(raw) => raw
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .with_context(|| format!("STRICT_NOT_FOUND must be true or false, got {raw:?}"))?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            banned_words_path,
            not_found_policy: if strict {
                NotFoundPolicy::Strict
            } else {
                NotFoundPolicy::Silent
            },
        })
    }
}
