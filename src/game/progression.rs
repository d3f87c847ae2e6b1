//! Level, clock and word-length progression

use super::GameConfig;

/// Seconds at or below which the timer is shown as running low
pub const LOW_TIME_THRESHOLD: f64 = 10.0;

/// Outcome of a clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains
    Running,
    /// This tick ran the clock out
    Expired,
    /// The game was already over; nothing changed
    AlreadyOver,
}

/// Level, time remaining and word length for one game
#[derive(Debug, Clone)]
pub struct Progression {
    config: GameConfig,
    level: u32,
    time_left: f64,
    word_length: usize,
    is_over: bool,
}

impl Progression {
    /// Fresh progression at level 1 with the full starting time
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            level: 1,
            time_left: config.starting_time,
            word_length: config.word_length_for(1),
            is_over: false,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Seconds left, possibly fractional
    #[must_use]
    pub const fn time_left(&self) -> f64 {
        self.time_left
    }

    /// Seconds left as shown to the player: floored, never negative
    #[must_use]
    pub fn display_seconds(&self) -> u32 {
        self.time_left.max(0.0).floor() as u32
    }

    #[must_use]
    pub fn is_low_time(&self) -> bool {
        self.time_left <= LOW_TIME_THRESHOLD
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.is_over
    }

    /// Advance a level after a solved word: time bonus and new word length
    ///
    /// # Examples
    /// ```
    /// use word_shift::game::{GameConfig, Progression};
    ///
    /// let mut progression = Progression::new(GameConfig::default());
    /// progression.level_up();
    /// assert_eq!(progression.level(), 2);
    /// assert_eq!(progression.time_left(), 70.0);
    /// ```
    pub fn level_up(&mut self) {
        self.skip_level();
        self.time_left += self.config.time_bonus;
    }

    /// Advance a level without the time bonus
    pub fn skip_level(&mut self) {
        self.level += 1;
        self.word_length = self.config.word_length_for(self.level);
    }

    /// Take one second off the clock
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_by(1.0)
    }

    /// Take `delta` seconds off the clock
    ///
    /// Reaching zero clamps the clock and ends the game.
    pub fn tick_by(&mut self, delta: f64) -> TickOutcome {
        if self.is_over {
            return TickOutcome::AlreadyOver;
        }
        self.time_left -= delta;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.is_over = true;
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Whether a hint can be paid for without emptying the clock
    #[must_use]
    pub fn is_hint_affordable(&self) -> bool {
        self.time_left > self.config.hint_penalty
    }

    /// Deduct the hint penalty
    ///
    /// Callers check `is_hint_affordable` first; the clock is not clamped here.
    pub fn apply_hint_penalty(&mut self) {
        self.time_left -= self.config.hint_penalty;
    }

    /// End the game now
    pub fn end(&mut self) {
        self.is_over = true;
    }
}
