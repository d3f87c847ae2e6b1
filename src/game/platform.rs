//! Platform capabilities consumed by the session
//!
//! Everything outside the puzzle (sound, ads, remote storage, leaderboards,
//! host lifecycle messages) is reached through one injected `Platform`. Every
//! method has a best-effort default so an implementation only overrides the
//! services it actually has.

use super::{HighScore, PlatformError};
use std::fmt;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Correct,
    Wrong,
    LevelUp,
    GameOver,
}

impl SoundCue {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Correct => "correct",
            Self::Wrong => "wrong",
            Self::LevelUp => "levelUp",
            Self::GameOver => "gameOver",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle messages a hosting platform may want
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMessage {
    GameReady,
    GameplayStarted,
    GameplayStopped,
    PlayerGotAchievement,
}

/// Result of asking the player to earn an instant solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardOutcome {
    Granted,
    Declined,
    Failed,
}

/// Services provided by the hosting platform
pub trait Platform {
    /// Play a sound cue; fire-and-forget
    fn play(&mut self, _cue: SoundCue) {}

    /// Notify the host of a lifecycle change
    fn send_message(&mut self, _message: PlatformMessage) {}

    /// Load the high score from platform storage
    ///
    /// # Errors
    /// `PlatformError::Unsupported` when the platform has no storage.
    fn load_high_score(&mut self) -> Result<Option<HighScore>, PlatformError> {
        Err(PlatformError::Unsupported)
    }

    /// Save the high score to platform storage
    ///
    /// # Errors
    /// `PlatformError::Unsupported` when the platform has no storage.
    fn save_high_score(&mut self, _score: &HighScore) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    /// Ask the player to complete a reward flow (e.g. watch an ad)
    fn request_rewarded_completion(&mut self) -> RewardOutcome {
        RewardOutcome::Failed
    }

    /// Submit a leaderboard score
    ///
    /// # Errors
    /// `PlatformError::Unsupported` when the platform has no leaderboard.
    fn submit_score(&mut self, _score: u64, _details: &HighScore) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
}

/// Platform with no services: silent, no remote storage, rewards declined
///
/// Used for headless simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlatform;

impl Platform for SilentPlatform {
    fn request_rewarded_completion(&mut self) -> RewardOutcome {
        RewardOutcome::Declined
    }
}

/// Platform for standalone play: no ads or remote services
///
/// Rewards are granted straight away since there is nothing to watch. Sound
/// cues are queued for the front-end to render.
#[derive(Debug, Default)]
pub struct OfflinePlatform {
    pub sound_enabled: bool,
    cues: Vec<SoundCue>,
}

impl OfflinePlatform {
    #[must_use]
    pub const fn new(sound_enabled: bool) -> Self {
        Self {
            sound_enabled,
            cues: Vec::new(),
        }
    }

    /// Take the cues played since the last call
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

impl Platform for OfflinePlatform {
    fn play(&mut self, cue: SoundCue) {
        if self.sound_enabled {
            self.cues.push(cue);
        }
    }

    fn send_message(&mut self, message: PlatformMessage) {
        log::debug!("platform message: {message:?}");
    }

    fn request_rewarded_completion(&mut self) -> RewardOutcome {
        RewardOutcome::Granted
    }
}
