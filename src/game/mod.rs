//! Game progression and session orchestration
//!
//! `GameSession` is the entry point: it owns the current round, the countdown
//! and the deferred level transitions, and reaches the outside world only
//! through a `Platform`.

mod clock;
mod config;
mod error;
mod platform;
mod progression;
mod schedule;
mod score;
mod session;

pub use clock::{TICK_PERIOD, Ticker};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, PlatformError};
pub use platform::{
    OfflinePlatform, Platform, PlatformMessage, RewardOutcome, SilentPlatform, SoundCue,
};
pub use progression::{LOW_TIME_THRESHOLD, Progression, TickOutcome};
pub use schedule::{DeferredAction, Schedule, ScheduledTask};
pub use score::{HighScore, evaluate_high_score, leaderboard_score};
pub use session::{
    GameSession, GameSummary, LEVEL_UP_DELAY, REWARD_REVEAL_DELAY, SOLVE_DELAY, SessionEvent,
};
