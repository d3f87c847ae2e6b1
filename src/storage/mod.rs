//! Local high-score storage
//!
//! The fallback used whenever platform storage is missing or failing.

mod json;

pub use json::{JsonFileStore, default_high_score_path};

use crate::game::HighScore;
use std::fmt;
use std::io;

/// Local storage failure
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Format(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "high score storage I/O error: {e}"),
            Self::Format(e) => write!(f, "high score file is malformed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}

/// Somewhere to keep the high score between sessions
pub trait HighScoreStore {
    /// Load the stored high score, `None` if nothing was saved yet
    ///
    /// # Errors
    /// Returns `StoreError` if the store exists but cannot be read.
    fn load(&mut self) -> Result<Option<HighScore>, StoreError>;

    /// Replace the stored high score
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be written.
    fn save(&mut self, score: &HighScore) -> Result<(), StoreError>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<HighScore>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { score: None }
    }

    #[must_use]
    pub const fn with_score(score: HighScore) -> Self {
        Self { score: Some(score) }
    }

    #[must_use]
    pub const fn score(&self) -> Option<HighScore> {
        self.score
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<HighScore>, StoreError> {
        Ok(self.score)
    }

    fn save(&mut self, score: &HighScore) -> Result<(), StoreError> {
        self.score = Some(*score);
        Ok(())
    }
}
