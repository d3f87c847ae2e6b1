//! Error types for the game engine

use std::fmt;

/// Invalid session configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// First word length outside the supported range
    StartWordLength(usize),
    /// Zero words per level would make word length grow without bound
    WordsPerLevel,
    /// A time setting that is negative, NaN or infinite
    InvalidTime { field: &'static str, value: f64 },
    /// The game would be over before it starts
    NoStartingTime,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartWordLength(len) => write!(
                f,
                "start word length must be {}-{}, got {len}",
                crate::core::MIN_WORD_LENGTH,
                crate::core::MAX_WORD_LENGTH
            ),
            Self::WordsPerLevel => write!(f, "words per level must be at least 1"),
            Self::InvalidTime { field, value } => {
                write!(f, "{field} must be a finite, non-negative number of seconds, got {value}")
            }
            Self::NoStartingTime => write!(f, "starting time must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Conditions that stop a game from starting or continuing
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The catalog has no word of the required length
    EmptyCategory { length: usize },
    /// The session configuration was rejected
    Config(ConfigError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory { length } => {
                write!(f, "cannot start a round: no {length}-letter words in the catalog")
            }
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::EmptyCategory { .. } => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Failure reported by a platform service (remote storage, ads, leaderboard)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform does not offer this service
    Unsupported,
    /// The service was reached but failed
    Failed(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "not supported on this platform"),
            Self::Failed(reason) => write!(f, "platform call failed: {reason}"),
        }
    }
}

impl std::error::Error for PlatformError {}
