//! Autoplay strategies
//!
//! Defines the Strategy trait and concrete implementations.

use crate::core::{Direction, PuzzleRound};
use crate::game::Progression;

/// One player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Swap the tile at `index` with its neighbour
    Move { index: usize, direction: Direction },
    /// Spend time on a hint
    Hint,
}

/// A strategy for choosing the next action on a round
pub trait Strategy {
    /// Pick the next action, or `None` if the round is already solved
    fn next_action(&self, round: &PuzzleRound, progression: &Progression) -> Option<Action>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy)]
pub enum StrategyType {
    /// Move letters into place one swap at a time (default)
    Insertion(InsertionStrategy),
    /// Buy hints while the clock allows, otherwise move
    Hinting(HintingStrategy),
}

impl Strategy for StrategyType {
    fn next_action(&self, round: &PuzzleRound, progression: &Progression) -> Option<Action> {
        match self {
            Self::Insertion(s) => s.next_action(round, progression),
            Self::Hinting(s) => s.next_action(round, progression),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "insertion", "hint", "hinting".
    /// Defaults to insertion if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "hint" | "hinting" => Self::Hinting(HintingStrategy::default()),
            _ => Self::Insertion(InsertionStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Insertion(_) => "insertion",
            Self::Hinting(_) => "hinting",
        }
    }
}

/// Fix the leftmost wrong slot by walking the letter it needs leftwards
///
/// Letters left of the wrong slot are already correct, so the needed letter is
/// always found to its right and never has to wrap around.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionStrategy;

impl Strategy for InsertionStrategy {
    fn next_action(&self, round: &PuzzleRound, _progression: &Progression) -> Option<Action> {
        let target = round.word().chars();
        let arrangement = round.arrangement();

        let slot = arrangement.iter().zip(target).position(|(a, t)| a != t)?;
        let needed = target[slot];

        // Prefer a copy of the letter that is itself out of place
        let source = (slot + 1..arrangement.len())
            .find(|&j| arrangement[j] == needed && arrangement[j] != target[j])
            .or_else(|| (slot + 1..arrangement.len()).find(|&j| arrangement[j] == needed))?;

        Some(Action::Move {
            index: source,
            direction: Direction::Backward,
        })
    }
}

/// Hint whenever at least `min_incorrect` tiles are wrong and time allows
#[derive(Debug, Clone, Copy)]
pub struct HintingStrategy {
    pub min_incorrect: usize,
}

impl HintingStrategy {
    #[must_use]
    pub const fn new(min_incorrect: usize) -> Self {
        Self { min_incorrect }
    }
}

impl Default for HintingStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Strategy for HintingStrategy {
    fn next_action(&self, round: &PuzzleRound, progression: &Progression) -> Option<Action> {
        let incorrect = round.incorrect_positions().len();
        if incorrect == 0 {
            return None;
        }
        if incorrect >= self.min_incorrect && progression.is_hint_affordable() {
            return Some(Action::Hint);
        }
        InsertionStrategy.next_action(round, progression)
    }
}
