//! Game session orchestration
//!
//! Composes the round, the progression, the countdown and the deferred task
//! schedule into the operations a presentation layer calls. Side effects go
//! out through the injected `Platform` and the session event queue.

use super::clock::Ticker;
use super::platform::{Platform, PlatformMessage, RewardOutcome, SoundCue};
use super::progression::{Progression, TickOutcome};
use super::schedule::{DeferredAction, Schedule, ScheduledTask};
use super::score::{HighScore, evaluate_high_score, leaderboard_score};
use super::{GameConfig, GameError, PlatformError};
use crate::core::{Direction, Feedback, FeedbackCue, MoveResult, PuzzleRound, Rejection};
use crate::storage::HighScoreStore;
use crate::wordlists::WordCatalog;
use rand::Rng;
use std::time::Duration;

/// Pause between the solving move and level completion
pub const SOLVE_DELAY: Duration = Duration::from_millis(500);

/// How long the level-up banner stays up before the next word
pub const LEVEL_UP_DELAY: Duration = Duration::from_millis(2000);

/// How long a rewarded solve stays on screen before the next word
pub const REWARD_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new word was dealt
    RoundStarted { round_id: u64, word_length: usize },
    /// The arrangement changed
    TilesChanged,
    /// The current word was solved
    RoundSolved { round_id: u64 },
    /// Level gained; the level-up banner is showing
    LevelUp { level: u32, word_length: usize },
    /// The level-up banner was dismissed
    LevelUpDismissed,
    Paused,
    Resumed,
    /// No further word could be dealt
    CannotContinue(GameError),
    GameOver(GameSummary),
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub level: u32,
    pub words_completed: u32,
    pub moves: u32,
    pub hints: u32,
    /// High score after this game
    pub high_score: HighScore,
    pub new_high_score: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    moves: u32,
    hints: u32,
    words_completed: u32,
}

/// One player's game, from start to game over and on to the next game
pub struct GameSession<'a, P: Platform, R: Rng> {
    catalog: &'a WordCatalog,
    config: GameConfig,
    platform: P,
    rng: R,
    local_store: Box<dyn HighScoreStore + 'a>,
    progression: Progression,
    round: Option<PuzzleRound>,
    round_id: u64,
    feedback: Option<Feedback>,
    totals: Totals,
    high_score: HighScore,
    ticker: Ticker,
    schedule: Schedule,
    now: Duration,
    started: bool,
    paused: bool,
    level_up_banner: Option<u32>,
    summary: Option<GameSummary>,
    events: Vec<SessionEvent>,
}

impl<'a, P: Platform, R: Rng> GameSession<'a, P, R> {
    /// Create a session and load the high score
    ///
    /// The high score comes from platform storage when available, else from
    /// `local_store`, else defaults to level 1.
    ///
    /// # Errors
    /// Returns `GameError::Config` if `config` does not validate.
    pub fn new(
        catalog: &'a WordCatalog,
        config: GameConfig,
        platform: P,
        local_store: Box<dyn HighScoreStore + 'a>,
        rng: R,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut session = Self {
            catalog,
            config,
            platform,
            rng,
            local_store,
            progression: Progression::new(config),
            round: None,
            round_id: 0,
            feedback: None,
            totals: Totals::default(),
            high_score: HighScore::default(),
            ticker: Ticker::default(),
            schedule: Schedule::new(),
            now: Duration::ZERO,
            started: false,
            paused: false,
            level_up_banner: None,
            summary: None,
            events: Vec::new(),
        };
        session.high_score = session.load_high_score();
        session.platform.send_message(PlatformMessage::GameReady);
        log::info!("session ready, high score {}", session.high_score);
        Ok(session)
    }

    /// Start (or restart) a game at level 1
    ///
    /// # Errors
    /// Returns `GameError::EmptyCategory` when no first word can be dealt; the
    /// session then has no active round.
    pub fn start_new_game(&mut self) -> Result<(), GameError> {
        self.schedule.clear();
        self.ticker.stop();
        self.progression = Progression::new(self.config);
        self.totals = Totals::default();
        self.round = None;
        self.feedback = None;
        self.level_up_banner = None;
        self.summary = None;
        self.paused = false;
        self.started = false;

        self.deal_word()?;
        self.started = true;
        self.ticker.start(self.now);
        self.platform.send_message(PlatformMessage::GameplayStarted);
        log::info!(
            "new game: {}s on the clock, {}-letter words",
            self.config.starting_time,
            self.progression.word_length()
        );
        Ok(())
    }

    /// Swap the tile at `index` with its neighbour
    ///
    /// # Errors
    /// A `Rejection` when the game is not running, the round is already solved
    /// or `index` is out of range. Nothing changes in that case.
    pub fn on_letter_move(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<MoveResult, Rejection> {
        self.ensure_running()?;
        let round = self.round.as_mut().ok_or(Rejection::NotStarted)?;
        let result = round.move_letter(index, direction)?;

        self.totals.moves += 1;
        self.platform.play(SoundCue::Move);
        self.refresh_feedback();
        self.events.push(SessionEvent::TilesChanged);

        if result.solved {
            self.events.push(SessionEvent::RoundSolved {
                round_id: self.round_id,
            });
            self.schedule.schedule(
                self.now,
                SOLVE_DELAY,
                self.round_id,
                self.progression.level(),
                DeferredAction::CompleteLevel,
            );
        }
        Ok(result)
    }

    /// Spend time to put one wrong letter right
    ///
    /// # Errors
    /// A `Rejection` when the game is not running, the round is solved, or the
    /// clock cannot cover the hint penalty.
    pub fn on_hint_requested(&mut self) -> Result<MoveResult, Rejection> {
        self.ensure_running()?;
        self.ensure_unsolved()?;
        if !self.progression.is_hint_affordable() {
            return Err(Rejection::InsufficientTime);
        }
        let round = self.round.as_mut().ok_or(Rejection::NotStarted)?;
        let result = round.use_hint(&mut self.rng)?;

        self.progression.apply_hint_penalty();
        self.totals.hints += 1;
        self.refresh_feedback();
        self.events.push(SessionEvent::TilesChanged);
        log::debug!("hint used, {:.0}s left", self.progression.time_left());

        if result.solved {
            self.events.push(SessionEvent::RoundSolved {
                round_id: self.round_id,
            });
            self.complete_level();
        }
        Ok(result)
    }

    /// Ask the platform for a rewarded instant solve
    ///
    /// A granted reward solves the word; otherwise a fresh word is dealt at the
    /// same level.
    ///
    /// # Errors
    /// A `Rejection` when the game is not running or the round is solved.
    pub fn on_solve_requested(&mut self) -> Result<RewardOutcome, Rejection> {
        self.ensure_running()?;
        self.ensure_unsolved()?;

        let outcome = self.platform.request_rewarded_completion();
        log::debug!("reward flow finished: {outcome:?}");
        match outcome {
            RewardOutcome::Granted => self.on_solve_granted()?,
            RewardOutcome::Declined | RewardOutcome::Failed => self.on_reward_unavailable()?,
        }
        Ok(outcome)
    }

    /// Reveal the word after an external reward flow completed
    ///
    /// # Errors
    /// A `Rejection` when the game is not running or the round is solved.
    pub fn on_solve_granted(&mut self) -> Result<(), Rejection> {
        self.ensure_running()?;
        self.ensure_unsolved()?;
        let round = self.round.as_mut().ok_or(Rejection::NotStarted)?;
        round.solve_immediately();

        self.refresh_feedback();
        self.events.push(SessionEvent::TilesChanged);
        self.events.push(SessionEvent::RoundSolved {
            round_id: self.round_id,
        });
        self.schedule.schedule(
            self.now,
            REWARD_REVEAL_DELAY,
            self.round_id,
            self.progression.level(),
            DeferredAction::RewardAdvance,
        );
        Ok(())
    }

    /// Deal a fresh word at the current level without any reward
    ///
    /// # Errors
    /// A `Rejection` when the game is not running or the round is solved.
    pub fn on_reward_unavailable(&mut self) -> Result<(), Rejection> {
        self.ensure_running()?;
        self.ensure_unsolved()?;
        self.deal_word_or_stop();
        Ok(())
    }

    /// One second off the clock
    ///
    /// # Errors
    /// A `Rejection` when no game is running or the countdown is paused.
    pub fn on_tick(&mut self) -> Result<TickOutcome, Rejection> {
        self.ensure_running()?;
        let outcome = self.progression.tick();
        if outcome == TickOutcome::Expired {
            log::info!("time is up at level {}", self.progression.level());
            self.game_over();
        }
        Ok(outcome)
    }

    /// Pause the countdown and save progress, e.g. when the window is hidden
    pub fn on_visibility_pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.ticker.stop();
        self.persist_high_score();
        self.events.push(SessionEvent::Paused);
        log::debug!("paused at {:.1}s left", self.progression.time_left());
    }

    /// Resume the countdown unless the game is over
    pub fn on_visibility_resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.started && !self.progression.is_over() {
            self.ticker.start(self.now);
        }
        self.events.push(SessionEvent::Resumed);
    }

    /// Move the session clock to `now`, firing due ticks and deferred tasks
    ///
    /// `now` is monotonic time since the session was created; going backwards
    /// is ignored. Ticks and tasks fire in time order, a task first on a tie.
    pub fn advance_to(&mut self, now: Duration) {
        if now < self.now {
            return;
        }
        loop {
            let tick_due = self.ticker.next_due().filter(|&due| due <= now);
            let task_due = self.schedule.next_due().filter(|&due| due <= now);

            match (tick_due, task_due) {
                (None, None) => break,
                (Some(tick), Some(task)) if task <= tick => self.fire_task(task),
                (None, Some(task)) => self.fire_task(task),
                (Some(tick), _) => {
                    self.now = tick;
                    self.ticker.take_due(tick);
                    if let Err(rejection) = self.on_tick() {
                        log::debug!("tick at {tick:?} rejected: {rejection:?}");
                    }
                }
            }
        }
        self.now = now;
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub const fn round(&self) -> Option<&PuzzleRound> {
        self.round.as_ref()
    }

    /// Tile feedback for the current arrangement
    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub const fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.progression.level()
    }

    /// Moves made this game, across all words
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.totals.moves
    }

    #[must_use]
    pub const fn hints(&self) -> u32 {
        self.totals.hints
    }

    #[must_use]
    pub const fn words_completed(&self) -> u32 {
        self.totals.words_completed
    }

    #[must_use]
    pub const fn time_left(&self) -> f64 {
        self.progression.time_left()
    }

    #[must_use]
    pub const fn high_score(&self) -> HighScore {
        self.high_score
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.progression.is_over()
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Level shown on the level-up banner, while it is up
    #[must_use]
    pub const fn level_up_banner(&self) -> Option<u32> {
        self.level_up_banner
    }

    /// Summary of the last finished game
    #[must_use]
    pub const fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Session clock
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn ensure_running(&self) -> Result<(), Rejection> {
        if !self.started {
            return Err(Rejection::NotStarted);
        }
        if self.progression.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.paused {
            return Err(Rejection::Paused);
        }
        Ok(())
    }

    fn ensure_unsolved(&self) -> Result<(), Rejection> {
        match &self.round {
            None => Err(Rejection::NotStarted),
            Some(round) if round.is_solved() => Err(Rejection::RoundSolved),
            Some(_) => Ok(()),
        }
    }

    /// Deal a word at the current word length
    fn deal_word(&mut self) -> Result<(), GameError> {
        let length = self.progression.word_length();
        let previous = self.round.as_ref().map(PuzzleRound::word);
        let round = PuzzleRound::select(self.catalog, length, previous, &mut self.rng)?;

        self.round_id += 1;
        log::debug!("round {} dealt a {length}-letter word", self.round_id);
        self.round = Some(round);
        self.feedback = None;
        self.refresh_feedback();
        self.events.push(SessionEvent::RoundStarted {
            round_id: self.round_id,
            word_length: length,
        });

        // An unscramblable word is dealt solved; complete it like a solving move
        if self.round.as_ref().is_some_and(PuzzleRound::is_solved) {
            self.events.push(SessionEvent::RoundSolved {
                round_id: self.round_id,
            });
            self.schedule.schedule(
                self.now,
                SOLVE_DELAY,
                self.round_id,
                self.progression.level(),
                DeferredAction::CompleteLevel,
            );
        }
        Ok(())
    }

    /// Deal the next word, ending the game if the catalog cannot supply one
    fn deal_word_or_stop(&mut self) {
        if let Err(e) = self.deal_word() {
            log::error!("{e}");
            self.events.push(SessionEvent::CannotContinue(e));
            self.game_over();
        }
    }

    /// Recompute tile feedback and play the cues it earned
    fn refresh_feedback(&mut self) {
        let Some(round) = &self.round else {
            return;
        };
        let feedback = round.feedback(self.feedback.as_ref());
        for cue in feedback.cues() {
            match cue {
                FeedbackCue::NewlyCorrect(_) => self.platform.play(SoundCue::Correct),
                FeedbackCue::Wrong(_) => self.platform.play(SoundCue::Wrong),
            }
        }
        self.feedback = Some(feedback);
    }

    fn complete_level(&mut self) {
        self.platform.play(SoundCue::LevelUp);
        self.progression.level_up();
        self.totals.words_completed += 1;
        self.platform
            .send_message(PlatformMessage::PlayerGotAchievement);

        let level = self.progression.level();
        let word_length = self.progression.word_length();
        self.level_up_banner = Some(level);
        self.events.push(SessionEvent::LevelUp { level, word_length });
        log::info!("level {level} reached, next words have {word_length} letters");

        self.schedule.schedule(
            self.now,
            LEVEL_UP_DELAY,
            self.round_id,
            level,
            DeferredAction::AdvanceWord,
        );
    }

    fn fire_task(&mut self, due: Duration) {
        self.now = due;
        let Some(task) = self.schedule.pop_due(due) else {
            return;
        };
        if self.is_stale(&task) {
            log::debug!("dropping stale {:?} for round {}", task.action, task.round_id);
            return;
        }

        match task.action {
            DeferredAction::CompleteLevel => self.complete_level(),
            DeferredAction::AdvanceWord => {
                self.level_up_banner = None;
                self.events.push(SessionEvent::LevelUpDismissed);
                self.deal_word_or_stop();
            }
            DeferredAction::RewardAdvance => {
                self.progression.skip_level();
                self.totals.words_completed += 1;
                self.deal_word_or_stop();
            }
        }
    }

    fn is_stale(&self, task: &ScheduledTask) -> bool {
        !self.started
            || self.progression.is_over()
            || task.round_id != self.round_id
            || task.level != self.progression.level()
    }

    fn game_over(&mut self) {
        self.ticker.stop();
        self.schedule.clear();
        self.progression.end();
        self.level_up_banner = None;

        let level = self.progression.level();
        let moves = self.totals.moves;
        let new_high = evaluate_high_score(level, moves, self.high_score);
        if let Some(score) = new_high {
            log::info!("new high score: {score}");
            self.high_score = score;
            self.persist_high_score();
            self.submit_leaderboard(score);
        }

        self.platform.play(SoundCue::GameOver);
        self.platform.send_message(PlatformMessage::GameplayStopped);

        let summary = GameSummary {
            level,
            words_completed: self.totals.words_completed,
            moves,
            hints: self.totals.hints,
            high_score: self.high_score,
            new_high_score: new_high.is_some(),
        };
        self.summary = Some(summary);
        self.events.push(SessionEvent::GameOver(summary));
    }

    fn load_high_score(&mut self) -> HighScore {
        match self.platform.load_high_score() {
            Ok(score) => return score.unwrap_or_default(),
            Err(PlatformError::Unsupported) => {
                log::debug!("no platform storage, loading high score locally");
            }
            Err(e) => log::warn!("failed to load high score from platform: {e}"),
        }

        match self.local_store.load() {
            Ok(score) => score.unwrap_or_default(),
            Err(e) => {
                log::warn!("failed to load local high score: {e}");
                HighScore::default()
            }
        }
    }

    /// Best-effort save: platform storage first, local store as fallback
    fn persist_high_score(&mut self) {
        let score = self.high_score;
        match self.platform.save_high_score(&score) {
            Ok(()) => return,
            Err(PlatformError::Unsupported) => {}
            Err(e) => log::warn!("failed to save high score to platform: {e}"),
        }
        if let Err(e) = self.local_store.save(&score) {
            log::warn!("failed to save high score locally: {e}");
        }
    }

    fn submit_leaderboard(&mut self, score: HighScore) {
        match self.platform.submit_score(leaderboard_score(&score), &score) {
            Ok(()) | Err(PlatformError::Unsupported) => {}
            Err(e) => log::warn!("failed to submit leaderboard score: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::SilentPlatform;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records everything the session asks of the platform
    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundCue>,
        messages: Vec<PlatformMessage>,
        saved: Vec<HighScore>,
        submitted: Vec<u64>,
    }

    #[derive(Clone, Default)]
    struct RecordingPlatform {
        log: Rc<RefCell<Recorder>>,
        stored: Option<HighScore>,
        storage_fails: bool,
        reward: Option<RewardOutcome>,
    }

    impl Platform for RecordingPlatform {
        fn play(&mut self, cue: SoundCue) {
            self.log.borrow_mut().cues.push(cue);
        }

        fn send_message(&mut self, message: PlatformMessage) {
            self.log.borrow_mut().messages.push(message);
        }

        fn load_high_score(&mut self) -> Result<Option<HighScore>, PlatformError> {
            if self.storage_fails {
                Err(PlatformError::Failed("offline".into()))
            } else {
                Ok(self.stored)
            }
        }

        fn save_high_score(&mut self, score: &HighScore) -> Result<(), PlatformError> {
            if self.storage_fails {
                return Err(PlatformError::Failed("offline".into()));
            }
            self.log.borrow_mut().saved.push(*score);
            Ok(())
        }

        fn request_rewarded_completion(&mut self) -> RewardOutcome {
            self.reward.unwrap_or(RewardOutcome::Failed)
        }

        fn submit_score(&mut self, score: u64, _details: &HighScore) -> Result<(), PlatformError> {
            self.log.borrow_mut().submitted.push(score);
            Ok(())
        }
    }

    fn catalog() -> WordCatalog {
        WordCatalog::from_words([
            "WORD", "GAME", "PLAY", "SHIFT", "LEVEL", "PUZZLE", "PLAYER",
        ])
    }

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn session(
        catalog: &WordCatalog,
        platform: RecordingPlatform,
    ) -> GameSession<'_, RecordingPlatform, StdRng> {
        GameSession::new(
            catalog,
            config(),
            platform,
            Box::new(MemoryStore::new()),
            StdRng::seed_from_u64(17),
        )
        .unwrap()
    }

    fn started(catalog: &WordCatalog) -> (GameSession<'_, RecordingPlatform, StdRng>, Rc<RefCell<Recorder>>) {
        let platform = RecordingPlatform::default();
        let log = Rc::clone(&platform.log);
        let mut s = session(catalog, platform);
        s.start_new_game().unwrap();
        (s, log)
    }

    /// Replace the dealt round with a known arrangement
    fn force_round(s: &mut GameSession<'_, RecordingPlatform, StdRng>, word: &str, arrangement: &str) {
        s.round = Some(PuzzleRound::with_arrangement(
            Word::new(word).unwrap(),
            arrangement.as_bytes().to_vec(),
        ));
        s.feedback = None;
        s.refresh_feedback();
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn new_rejects_invalid_config() {
        let catalog = catalog();
        let bad = GameConfig {
            words_per_level: 0,
            ..GameConfig::default()
        };
        let result = GameSession::new(
            &catalog,
            bad,
            SilentPlatform,
            Box::new(MemoryStore::new()),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn operations_before_start_are_rejected() {
        let catalog = catalog();
        let mut s = session(&catalog, RecordingPlatform::default());
        assert_eq!(
            s.on_letter_move(0, Direction::Forward),
            Err(Rejection::NotStarted)
        );
        assert_eq!(s.on_hint_requested(), Err(Rejection::NotStarted));
        assert_eq!(s.on_tick(), Err(Rejection::NotStarted));
    }

    #[test]
    fn start_deals_scrambled_word_of_start_length() {
        let catalog = catalog();
        let (s, log) = started(&catalog);
        let round = s.round().unwrap();
        assert_eq!(round.word().len(), 4);
        assert!(!round.is_solved());
        assert_eq!(s.level(), 1);
        assert_eq!(s.moves(), 0);
        assert!(
            log.borrow()
                .messages
                .ends_with(&[PlatformMessage::GameReady, PlatformMessage::GameplayStarted])
        );
    }

    #[test]
    fn start_fails_without_words_of_start_length() {
        let catalog = WordCatalog::from_words(["SHIFT"]);
        let mut s = session(&catalog, RecordingPlatform::default());
        assert_eq!(
            s.start_new_game(),
            Err(GameError::EmptyCategory { length: 4 })
        );
        assert!(s.round().is_none());
        assert_eq!(s.on_tick(), Err(Rejection::NotStarted));
    }

    #[test]
    fn unscramblable_word_completes_on_its_own() {
        let catalog = WordCatalog::from_words(["AAAA"]);
        let (mut s, _log) = started(&catalog);
        assert!(s.round().unwrap().is_solved());
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, SessionEvent::RoundSolved { .. }))
        );

        s.advance_to(secs(0.5));
        assert_eq!(s.level(), 2);
        assert!(!s.is_over());

        // The same word comes back and completes again after the banner
        s.advance_to(secs(3.0));
        assert_eq!(s.level(), 3);
        assert_eq!(s.words_completed(), 2);
    }

    #[test]
    fn move_plays_move_then_feedback_cues() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        force_round(&mut s, "WORD", "DROW");
        log.borrow_mut().cues.clear();

        // DROW -> RDOW: nothing correct, wrong cue fires
        let result = s.on_letter_move(0, Direction::Forward).unwrap();
        assert_eq!(result.arrangement, b"RDOW");
        assert_eq!(log.borrow().cues, vec![SoundCue::Move, SoundCue::Wrong]);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn solving_move_completes_level_after_delay() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        force_round(&mut s, "WORD", "OWRD");

        let result = s.on_letter_move(0, Direction::Forward).unwrap();
        assert!(result.solved);
        assert_eq!(s.level(), 1);

        // Further moves wait for the next word
        assert_eq!(
            s.on_letter_move(0, Direction::Forward),
            Err(Rejection::RoundSolved)
        );

        s.advance_to(secs(0.5));
        assert_eq!(s.level(), 2);
        assert_eq!(s.level_up_banner(), Some(2));
        assert!((s.time_left() - 70.0).abs() < 1e-9);
        assert!(log.borrow().cues.contains(&SoundCue::LevelUp));
        assert!(
            log.borrow()
                .messages
                .contains(&PlatformMessage::PlayerGotAchievement)
        );

        // Banner dismissed and a new word dealt two seconds later
        let solved_round = s.round_id;
        s.advance_to(secs(2.5));
        assert_eq!(s.level_up_banner(), None);
        assert_eq!(s.round_id, solved_round + 1);
        assert!(!s.round().unwrap().is_solved());
        assert_eq!(s.words_completed(), 1);
    }

    #[test]
    fn hint_solving_word_levels_up_immediately() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        force_round(&mut s, "WORD", "OWRD");
        log.borrow_mut().cues.clear();

        let result = s.on_hint_requested().unwrap();
        assert!(result.solved);
        assert_eq!(s.level(), 2);
        assert_eq!(s.hints(), 1);
        // 60 - 15 penalty + 10 bonus
        assert!((s.time_left() - 55.0).abs() < 1e-9);
        assert_eq!(
            log.borrow().cues,
            vec![SoundCue::Correct, SoundCue::Correct, SoundCue::LevelUp]
        );
    }

    #[test]
    fn hint_rejected_without_enough_time() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        force_round(&mut s, "WORD", "DROW");
        s.progression.tick_by(45.0);
        assert!((s.time_left() - 15.0).abs() < 1e-9);

        assert_eq!(s.on_hint_requested(), Err(Rejection::InsufficientTime));
        assert_eq!(s.round().unwrap().arrangement(), b"DROW");
        assert!((s.time_left() - 15.0).abs() < 1e-9);
        assert_eq!(s.hints(), 0);
    }

    #[test]
    fn hint_rejected_when_solved() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        force_round(&mut s, "WORD", "OWRD");
        s.on_letter_move(0, Direction::Forward).unwrap();
        assert_eq!(s.on_hint_requested(), Err(Rejection::RoundSolved));
    }

    #[test]
    fn tick_counts_down_and_ends_game() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        s.progression.tick_by(58.0);

        assert_eq!(s.on_tick(), Ok(TickOutcome::Running));
        assert_eq!(s.on_tick(), Ok(TickOutcome::Expired));
        assert!(s.is_over());
        assert!(s.time_left().abs() < 1e-9);
        assert_eq!(s.on_tick(), Err(Rejection::GameOver));
        assert_eq!(
            s.on_letter_move(0, Direction::Forward),
            Err(Rejection::GameOver)
        );
        assert!(log.borrow().cues.contains(&SoundCue::GameOver));
        assert!(
            log.borrow()
                .messages
                .contains(&PlatformMessage::GameplayStopped)
        );
    }

    #[test]
    fn advance_drives_countdown_at_one_second_cadence() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        s.advance_to(secs(0.9));
        assert!((s.time_left() - 60.0).abs() < 1e-9);
        s.advance_to(secs(10.0));
        assert!((s.time_left() - 50.0).abs() < 1e-9);
        s.advance_to(secs(120.0));
        assert!(s.is_over());
        assert!(s.time_left().abs() < 1e-9);
    }

    #[test]
    fn advancing_after_game_over_changes_nothing() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        s.advance_to(secs(60.0));
        assert!(s.is_over());
        let cues = log.borrow().cues.len();

        s.advance_to(secs(120.0));
        assert!(s.time_left().abs() < 1e-9);
        assert_eq!(s.level(), 1);
        assert_eq!(log.borrow().cues.len(), cues);
        assert_eq!(s.now(), secs(120.0));
    }

    #[test]
    fn pause_stops_countdown_without_catch_up() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        s.advance_to(secs(5.0));
        s.on_visibility_pause();
        assert!(s.is_paused());

        assert_eq!(s.on_tick(), Err(Rejection::Paused));
        s.advance_to(secs(50.0));
        assert!((s.time_left() - 55.0).abs() < 1e-9);
        assert_eq!(
            s.on_letter_move(0, Direction::Forward),
            Err(Rejection::Paused)
        );

        s.on_visibility_resume();
        s.advance_to(secs(50.9));
        assert!((s.time_left() - 55.0).abs() < 1e-9);
        s.advance_to(secs(51.0));
        assert!((s.time_left() - 54.0).abs() < 1e-9);
        assert_eq!(s.on_tick(), Ok(TickOutcome::Running));
        assert!((s.time_left() - 53.0).abs() < 1e-9);
    }

    #[test]
    fn pause_saves_high_score() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        s.on_visibility_pause();
        assert_eq!(log.borrow().saved, vec![HighScore::default()]);
        // A second pause is a no-op
        s.on_visibility_pause();
        assert_eq!(log.borrow().saved.len(), 1);
    }

    #[test]
    fn resume_after_game_over_keeps_clock_stopped() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        s.advance_to(secs(60.0));
        assert!(s.is_over());
        s.on_visibility_pause();
        s.on_visibility_resume();
        assert!(!s.ticker.is_running());
    }

    #[test]
    fn stale_level_completion_is_dropped_after_restart() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        force_round(&mut s, "WORD", "OWRD");
        s.on_letter_move(0, Direction::Forward).unwrap();

        // Restart before the deferred completion fires
        s.start_new_game().unwrap();
        s.advance_to(secs(3.0));
        assert_eq!(s.level(), 1);
        assert_eq!(s.level_up_banner(), None);
    }

    #[test]
    fn stale_task_for_superseded_round_is_ignored() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        let old_round = s.round_id;
        s.schedule.schedule(
            s.now,
            Duration::from_millis(100),
            old_round,
            1,
            DeferredAction::AdvanceWord,
        );
        // Skip to a new word, then let the old task fire
        s.on_reward_unavailable().unwrap();
        let current = s.round_id;
        s.advance_to(secs(0.2));
        assert_eq!(s.round_id, current);
        assert_ne!(current, old_round);
    }

    #[test]
    fn granted_reward_solves_and_skips_level_without_bonus() {
        let catalog = catalog();
        let platform = RecordingPlatform {
            reward: Some(RewardOutcome::Granted),
            ..RecordingPlatform::default()
        };
        let mut s = session(&catalog, platform);
        s.start_new_game().unwrap();
        let moves_before = s.moves();

        assert_eq!(s.on_solve_requested(), Ok(RewardOutcome::Granted));
        assert!(s.round().unwrap().is_solved());
        assert_eq!(s.moves(), moves_before);

        s.advance_to(secs(1.0));
        assert_eq!(s.level(), 2);
        // One tick elapsed, no time bonus
        assert!((s.time_left() - 59.0).abs() < 1e-9);
        assert!(!s.round().unwrap().is_solved());
    }

    #[test]
    fn declined_reward_deals_new_word_at_same_level() {
        let catalog = catalog();
        let platform = RecordingPlatform {
            reward: Some(RewardOutcome::Declined),
            ..RecordingPlatform::default()
        };
        let mut s = session(&catalog, platform);
        s.start_new_game().unwrap();
        let before = s.round_id;
        let previous_word = s.round().unwrap().word().clone();

        assert_eq!(s.on_solve_requested(), Ok(RewardOutcome::Declined));
        assert_eq!(s.round_id, before + 1);
        assert_ne!(s.round().unwrap().word(), &previous_word);
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn game_over_records_new_high_score() {
        let catalog = catalog();
        let (mut s, log) = started(&catalog);
        force_round(&mut s, "WORD", "OWRD");
        s.on_letter_move(0, Direction::Forward).unwrap();
        s.advance_to(secs(0.5));
        assert_eq!(s.level(), 2);

        s.advance_to(secs(200.0));
        assert!(s.is_over());

        let summary = *s.summary().unwrap();
        assert_eq!(summary.level, 2);
        assert_eq!(summary.moves, 1);
        assert!(summary.new_high_score);
        assert_eq!(s.high_score(), HighScore { level: 2, moves: 1 });
        assert_eq!(log.borrow().saved, vec![HighScore { level: 2, moves: 1 }]);
        assert_eq!(log.borrow().submitted, vec![2999]);

        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::GameOver(summary)));
    }

    #[test]
    fn game_over_without_improvement_keeps_high_score() {
        let catalog = catalog();
        let platform = RecordingPlatform {
            stored: Some(HighScore { level: 9, moves: 40 }),
            ..RecordingPlatform::default()
        };
        let log = Rc::clone(&platform.log);
        let mut s = session(&catalog, platform);
        assert_eq!(s.high_score(), HighScore { level: 9, moves: 40 });

        s.start_new_game().unwrap();
        s.advance_to(secs(60.0));
        let summary = s.summary().unwrap();
        assert!(!summary.new_high_score);
        assert_eq!(summary.high_score, HighScore { level: 9, moves: 40 });
        assert!(log.borrow().saved.is_empty());
        assert!(log.borrow().submitted.is_empty());
    }

    #[test]
    fn failing_platform_storage_falls_back_to_local_store() {
        let catalog = catalog();
        let platform = RecordingPlatform {
            storage_fails: true,
            ..RecordingPlatform::default()
        };
        let local = MemoryStore::with_score(HighScore { level: 1, moves: 5 });
        let mut s = GameSession::new(
            &catalog,
            config(),
            platform,
            Box::new(local),
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        assert_eq!(s.high_score(), HighScore { level: 1, moves: 5 });

        s.start_new_game().unwrap();
        s.advance_to(secs(60.0));
        // Level 1 with 0 moves beats level 1 with 5 moves
        assert_eq!(s.high_score(), HighScore { level: 1, moves: 0 });
        assert!(s.summary().unwrap().new_high_score);
    }

    #[test]
    fn running_out_of_words_ends_game() {
        // Only 4-letter words, and every level grows the word length
        let catalog = WordCatalog::from_words(["WORD", "GAME"]);
        let cfg = GameConfig {
            words_per_level: 1,
            ..GameConfig::default()
        };
        let mut s = GameSession::new(
            &catalog,
            cfg,
            RecordingPlatform::default(),
            Box::new(MemoryStore::new()),
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        s.start_new_game().unwrap();
        force_round(&mut s, "WORD", "OWRD");
        s.on_letter_move(0, Direction::Forward).unwrap();
        s.advance_to(secs(2.5));

        assert!(s.is_over());
        let events = s.drain_events();
        assert!(events.contains(&SessionEvent::CannotContinue(GameError::EmptyCategory {
            length: 5
        })));
    }

    #[test]
    fn restart_resets_progress() {
        let catalog = catalog();
        let (mut s, _) = started(&catalog);
        force_round(&mut s, "WORD", "DROW");
        s.on_letter_move(0, Direction::Forward).unwrap();
        s.advance_to(secs(60.0));
        assert!(s.is_over());

        s.start_new_game().unwrap();
        assert!(!s.is_over());
        assert_eq!(s.moves(), 0);
        assert_eq!(s.level(), 1);
        assert!((s.time_left() - 60.0).abs() < 1e-9);
        assert!(s.summary().is_none());
    }
}
