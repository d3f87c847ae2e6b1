//! High score kept in a small JSON file

use super::{HighScoreStore, StoreError};
use crate::game::HighScore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default location: `<user data dir>/word_shift/high_score.json`
///
/// Falls back to the working directory when the platform has no data dir.
#[must_use]
pub fn default_high_score_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("word_shift"))
        .unwrap_or_default()
        .join("high_score.json")
}

/// Stores `{"level":N,"moves":M}` at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<HighScore>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, score: &HighScore) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(score)?)?;
        log::debug!("saved high score to {}", self.path.display());
        Ok(())
    }
}
