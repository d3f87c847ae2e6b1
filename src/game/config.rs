//! Session configuration

use super::ConfigError;
use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

/// Immutable game constants, set once per session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Seconds on the clock at the start of a game
    pub starting_time: f64,
    /// Seconds added on every level-up
    pub time_bonus: f64,
    /// Seconds deducted for a hint
    pub hint_penalty: f64,
    /// Levels between word length increases
    pub words_per_level: u32,
    /// Length of the first words dealt
    pub start_word_length: usize,
}

impl GameConfig {
    /// Check that the configuration can drive a game
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    ///
    /// # Examples
    /// ```
    /// use word_shift::game::GameConfig;
    ///
    /// assert!(GameConfig::default().validate().is_ok());
    ///
    /// let config = GameConfig { start_word_length: 3, ..GameConfig::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&self.start_word_length) {
            return Err(ConfigError::StartWordLength(self.start_word_length));
        }
        if self.words_per_level == 0 {
            return Err(ConfigError::WordsPerLevel);
        }
        for (field, value) in [
            ("starting time", self.starting_time),
            ("time bonus", self.time_bonus),
            ("hint penalty", self.hint_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTime { field, value });
            }
        }
        if self.starting_time <= 0.0 {
            return Err(ConfigError::NoStartingTime);
        }
        Ok(())
    }

    /// Word length dealt at `level`
    ///
    /// Grows by one every `words_per_level` levels, capped at 8.
    #[must_use]
    pub fn word_length_for(&self, level: u32) -> usize {
        let steps = (level.saturating_sub(1) / self.words_per_level.max(1)) as usize;
        (self.start_word_length + steps).min(MAX_WORD_LENGTH)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_time: 60.0,
            time_bonus: 10.0,
            hint_penalty: 15.0,
            words_per_level: 5,
            start_word_length: 4,
        }
    }
}
