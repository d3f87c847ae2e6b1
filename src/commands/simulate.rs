//! Headless simulation
//!
//! Plays many complete games with an automatic player, in parallel, on a
//! virtual clock. Each game gets its own session and seeded RNG; only the word
//! catalog is shared.

use crate::core::Rejection;
use crate::game::{GameConfig, GameError, GameSession, SessionEvent, SilentPlatform};
use crate::solver::{Action, Strategy};
use crate::storage::MemoryStore;
use crate::wordlists::WordCatalog;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Simulation parameters
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub games: usize,
    /// Game `i` is seeded with `seed + i`
    pub seed: u64,
    /// Player speed in actions per second of game time
    pub moves_per_second: f64,
    /// Stop a game once it reaches this level
    pub max_level: u32,
    pub show_progress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 0,
            moves_per_second: 2.0,
            max_level: 25,
            show_progress: true,
        }
    }
}

/// One simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedGame {
    pub seed: u64,
    pub level: u32,
    pub words_completed: u32,
    pub moves: u32,
    pub hints: u32,
    /// Stopped at `max_level` instead of running out of time
    pub capped: bool,
}

/// Aggregated simulation statistics
#[derive(Debug)]
pub struct SimulationResult {
    pub games: Vec<PlayedGame>,
    pub failed: usize,
    pub level_distribution: FxHashMap<u32, usize>,
    pub average_level: f64,
    pub average_moves: f64,
    pub average_hints: f64,
    pub capped: usize,
    pub best: Option<PlayedGame>,
    pub duration: Duration,
}

/// Play `config.games` games in parallel
///
/// Games that fail are logged and counted in `failed`.
pub fn run_simulation<S: Strategy + Sync>(
    catalog: &WordCatalog,
    game_config: GameConfig,
    config: &SimulationConfig,
    strategy: &S,
) -> SimulationResult {
    let start = Instant::now();
    let pb = progress_bar(config);

    let outcomes: Vec<Result<PlayedGame, GameError>> = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let seed = config.seed.wrapping_add(i as u64);
            let outcome = play_game(catalog, game_config, config, strategy, seed);
            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut failed = 0;
    let mut games = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(game) => games.push(game),
            Err(e) => {
                log::warn!("simulated game failed: {e}");
                failed += 1;
            }
        }
    }

    let mut level_distribution: FxHashMap<u32, usize> = FxHashMap::default();
    for game in &games {
        *level_distribution.entry(game.level).or_insert(0) += 1;
    }

    let mean = |f: fn(&PlayedGame) -> u32| {
        if games.is_empty() {
            0.0
        } else {
            games.iter().map(|g| f64::from(f(g))).sum::<f64>() / games.len() as f64
        }
    };
    let average_level = mean(|g| g.level);
    let average_moves = mean(|g| g.moves);
    let average_hints = mean(|g| g.hints);

    let best = games
        .iter()
        .copied()
        .max_by_key(|g| (g.level, std::cmp::Reverse(g.moves)));

    SimulationResult {
        capped: games.iter().filter(|g| g.capped).count(),
        games,
        failed,
        level_distribution,
        average_level,
        average_moves,
        average_hints,
        best,
        duration: start.elapsed(),
    }
}

/// Play one game to the end
///
/// # Errors
/// Returns a `GameError` if the session cannot start or runs out of words.
///
/// # Panics
/// Panics if `config.moves_per_second` is not positive.
pub fn play_game<S: Strategy>(
    catalog: &WordCatalog,
    game_config: GameConfig,
    config: &SimulationConfig,
    strategy: &S,
    seed: u64,
) -> Result<PlayedGame, GameError> {
    let mut session = GameSession::new(
        catalog,
        game_config,
        SilentPlatform,
        Box::new(MemoryStore::new()),
        StdRng::seed_from_u64(seed),
    )?;
    session.start_new_game()?;

    let step = Duration::from_secs_f64(1.0 / config.moves_per_second);
    let mut now = Duration::ZERO;

    while !session.is_over() && session.level() < config.max_level {
        now += step;
        session.advance_to(now);

        for event in session.drain_events() {
            if let SessionEvent::CannotContinue(e) = event {
                return Err(e);
            }
        }
        if session.is_over() {
            break;
        }

        let Some(round) = session.round() else {
            break;
        };
        let Some(action) = strategy.next_action(round, session.progression()) else {
            // Solved; waiting for the next word
            continue;
        };
        let applied = match action {
            Action::Move { index, direction } => {
                session.on_letter_move(index, direction).map(|_| ())
            }
            Action::Hint => session.on_hint_requested().map(|_| ()),
        };
        if let Err(rejection) = applied {
            log_rejection(seed, rejection);
        }
    }

    Ok(PlayedGame {
        seed,
        level: session.level(),
        words_completed: session.words_completed(),
        moves: session.moves(),
        hints: session.hints(),
        capped: !session.is_over(),
    })
}

fn log_rejection(seed: u64, rejection: Rejection) {
    match rejection {
        Rejection::InsufficientTime | Rejection::RoundSolved => {
            log::trace!("game {seed}: {rejection}");
        }
        _ => log::warn!("game {seed}: action rejected: {rejection}"),
    }
}

fn progress_bar(config: &SimulationConfig) -> ProgressBar {
    if !config.show_progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(config.games as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}
