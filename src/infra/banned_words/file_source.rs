use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::moderation::{BannedWordSource, LoadError};

/// Reads banned words from a text file, one word per line.
pub struct FileBannedWordSource {
    path: PathBuf,
}

impl FileBannedWordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl BannedWordSource for FileBannedWordSource {
    async fn load_lines(&self) -> Result<Vec<String>, LoadError> {
        // No empty-list fallback: a missing file is a load error.
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        // `lines` also strips the `\r` of CRLF files.
        Ok(text.lines().map(str::to_string).collect())
    }
}
