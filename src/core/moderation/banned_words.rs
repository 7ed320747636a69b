// Banned-word filter - rejects submissions that contain forbidden substrings.
//
// The filter is built once at startup and never mutated afterwards, so it can
// be shared between stores behind an `Arc` without a lock.

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read banned words from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for wherever the banned-word list lives.
#[async_trait]
pub trait BannedWordSource: Send + Sync {
    /// Return the raw lines of the list, one banned word per line.
    async fn load_lines(&self) -> Result<Vec<String>, LoadError>;
}

/// A set of lowercase banned substrings.
#[derive(Debug, Clone, Default)]
pub struct BannedWordFilter {
    words: HashSet<String>,
}

impl BannedWordFilter {
    /// Build a filter from raw lines.
    ///
    /// Each line is lowercased. Blank lines are skipped: an empty pattern is
    /// a substring of every text and would reject everything.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| line.as_ref().to_lowercase())
            .collect();

        Self { words }
    }

    /// Load the list from a source. Failures are returned as-is, never retried.
    pub async fn load<S>(source: &S) -> Result<Self, LoadError>
    where
        S: BannedWordSource + ?Sized,
    {
        let lines = source.load_lines().await?;
        Ok(Self::from_lines(lines))
    }

    /// Check whether `text` contains any banned word, ignoring case.
    ///
    /// This is a plain substring test: "spam" also matches "SPAMtastic".
    pub fn contains(&self, text: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }

        let lowered = text.to_lowercase();
        self.words.iter().any(|word| lowered.contains(word.as_str()))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
