//! Word solving command
//!
//! Unscrambles a specific word with an automatic player and returns the path.

use crate::core::{PuzzleRound, TileClass, Word};
use crate::game::{GameConfig, Progression};
use crate::solver::{Action, Strategy};
use rand::Rng;

/// Configuration for solving a word
pub struct SolveConfig {
    pub target: String,
    /// Starting arrangement; a random scramble when `None`
    pub scramble: Option<String>,
    pub max_moves: u32,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: String) -> Self {
        Self {
            target,
            scramble: None,
            max_moves: 100,
        }
    }
}

/// Result of solving a word
pub struct SolveResult {
    pub success: bool,
    pub target: String,
    pub start: String,
    pub start_tiles: Vec<TileClass>,
    pub steps: Vec<SolveStep>,
}

/// A single action in the solution
pub struct SolveStep {
    pub action: Action,
    pub arrangement: String,
    pub tiles: Vec<TileClass>,
    pub newly_correct: usize,
}

/// Solve a specific word using the given strategy
///
/// Hints are applied directly to the round; the clock only decides whether a
/// strategy may ask for one.
///
/// # Errors
///
/// Returns an error if:
/// - The target word is invalid (not 4-8 letters or not alphabetic)
/// - The given scramble is not a rearrangement of the target
pub fn solve_word<S: Strategy, R: Rng + ?Sized>(
    config: SolveConfig,
    strategy: &S,
    rng: &mut R,
) -> Result<SolveResult, String> {
    let target = Word::new(&config.target).map_err(|e| format!("Invalid target word: {e}"))?;

    let mut round = match config.scramble {
        Some(scramble) => {
            let arrangement = scramble.to_ascii_uppercase().into_bytes();
            if !target.is_anagram(&arrangement) {
                return Err(format!("'{scramble}' is not a rearrangement of {target}"));
            }
            PuzzleRound::with_arrangement(target.clone(), arrangement)
        }
        None => PuzzleRound::from_word(target.clone(), rng),
    };

    let start = round.arrangement_text();
    let mut feedback = round.feedback(None);
    let start_tiles = feedback.tiles().to_vec();

    // Hint affordability follows a fresh clock
    let progression = Progression::new(GameConfig::default());
    let mut steps = Vec::new();

    while !round.is_solved() && round.move_count() + round.hints_used() < config.max_moves {
        let Some(action) = strategy.next_action(&round, &progression) else {
            break;
        };
        let applied = match action {
            Action::Move { index, direction } => round.move_letter(index, direction),
            Action::Hint => round.use_hint(rng),
        };
        applied.map_err(|e| format!("Strategy produced an invalid action: {e}"))?;

        let next = round.feedback(Some(&feedback));
        steps.push(SolveStep {
            action,
            arrangement: round.arrangement_text(),
            tiles: next.tiles().to_vec(),
            newly_correct: next.newly_correct(),
        });
        feedback = next;
    }

    log::debug!("{target}: {} steps from {start}", steps.len());

    Ok(SolveResult {
        success: round.is_solved(),
        target: target.text().to_string(),
        start,
        start_tiles,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{HintingStrategy, InsertionStrategy};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn solve_given_scramble() {
        let mut config = SolveConfig::new("word".to_string());
        config.scramble = Some("drow".to_string());
        let mut rng = StdRng::seed_from_u64(1);

        let result = solve_word(config, &InsertionStrategy, &mut rng).unwrap();

        assert!(result.success);
        assert_eq!(result.start, "DROW");
        assert_eq!(result.steps.last().unwrap().arrangement, "WORD");
        assert!(
            result
                .steps
                .last()
                .unwrap()
                .tiles
                .iter()
                .all(|&t| t == TileClass::Correct)
        );
    }

    #[test]
    fn solve_random_scramble() {
        let mut rng = StdRng::seed_from_u64(9);
        let result =
            solve_word(SolveConfig::new("PUZZLE".to_string()), &InsertionStrategy, &mut rng)
                .unwrap();

        assert!(result.success);
        assert_ne!(result.start, "PUZZLE");
        assert!(!result.steps.is_empty());
    }

    #[test]
    fn solve_with_hints() {
        let mut config = SolveConfig::new("PLAYER".to_string());
        config.scramble = Some("REYALP".to_string());
        let mut rng = StdRng::seed_from_u64(2);

        let result = solve_word(config, &HintingStrategy::default(), &mut rng).unwrap();

        assert!(result.success);
        assert!(result.steps.iter().any(|s| s.action == Action::Hint));
    }

    #[test]
    fn solve_rejects_foreign_scramble() {
        let mut config = SolveConfig::new("WORD".to_string());
        config.scramble = Some("WORK".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(solve_word(config, &InsertionStrategy, &mut rng).is_err());
    }

    #[test]
    fn solve_invalid_target_returns_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = solve_word(SolveConfig::new("owl".to_string()), &InsertionStrategy, &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn solve_respects_move_limit() {
        let mut config = SolveConfig::new("PLAYER".to_string());
        config.scramble = Some("REYALP".to_string());
        config.max_moves = 2;
        let mut rng = StdRng::seed_from_u64(1);

        let result = solve_word(config, &InsertionStrategy, &mut rng).unwrap();
        assert!(!result.success);
        assert_eq!(result.steps.len(), 2);
    }

    #[test]
    fn already_solved_scramble_needs_no_steps() {
        let mut config = SolveConfig::new("WORD".to_string());
        config.scramble = Some("WORD".to_string());
        let mut rng = StdRng::seed_from_u64(1);

        let result = solve_word(config, &InsertionStrategy, &mut rng).unwrap();
        assert!(result.success);
        assert!(result.steps.is_empty());
    }
}
