//! High scores and leaderboard scoring

use serde::{Deserialize, Serialize};
use std::fmt;

/// Best result across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Level reached
    pub level: u32,
    /// Total moves made in that game
    pub moves: u32,
}

impl Default for HighScore {
    fn default() -> Self {
        Self { level: 1, moves: 0 }
    }
}

impl fmt::Display for HighScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} in {} moves", self.level, self.moves)
    }
}

/// Decide whether a finished game beats the stored high score
///
/// A higher level always wins; at equal level fewer moves win. Returns the new
/// high score, or `None` when `previous` stands.
///
/// # Examples
/// ```
/// use word_shift::game::{HighScore, evaluate_high_score};
///
/// let previous = HighScore { level: 3, moves: 10 };
/// assert_eq!(
///     evaluate_high_score(3, 5, previous),
///     Some(HighScore { level: 3, moves: 5 })
/// );
/// assert_eq!(evaluate_high_score(2, 1, previous), None);
/// ```
#[must_use]
pub fn evaluate_high_score(level: u32, moves: u32, previous: HighScore) -> Option<HighScore> {
    let beats = level > previous.level || (level == previous.level && moves < previous.moves);
    beats.then_some(HighScore { level, moves })
}

/// Single number submitted to leaderboards
///
/// Level dominates; within a level, fewer moves (up to 1000) score higher.
#[must_use]
pub fn leaderboard_score(score: &HighScore) -> u64 {
    u64::from(score.level) * 1000 + u64::from(1000_u32.saturating_sub(score.moves))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hs(level: u32, moves: u32) -> HighScore {
        HighScore { level, moves }
    }

    #[test]
    fn higher_level_beats_fewer_moves() {
        assert_eq!(evaluate_high_score(3, 10, hs(2, 1)), Some(hs(3, 10)));
    }

    #[test]
    fn equal_level_fewer_moves_wins() {
        assert_eq!(evaluate_high_score(3, 5, hs(3, 10)), Some(hs(3, 5)));
    }

    #[test]
    fn equal_level_more_moves_loses() {
        assert_eq!(evaluate_high_score(3, 10, hs(3, 5)), None);
    }

    #[test]
    fn lower_level_never_wins() {
        assert_eq!(evaluate_high_score(2, 999, hs(3, 1)), None);
    }

    #[test]
    fn identical_result_is_not_new() {
        assert_eq!(evaluate_high_score(4, 20, hs(4, 20)), None);
    }

    #[test]
    fn default_high_score_is_level_one() {
        assert_eq!(HighScore::default(), hs(1, 0));
        // Level 1 with any moves never beats the default
        assert_eq!(evaluate_high_score(1, 0, HighScore::default()), None);
    }

    #[test]
    fn leaderboard_score_orders_by_level_then_moves() {
        assert_eq!(leaderboard_score(&hs(3, 10)), 3990);
        assert_eq!(leaderboard_score(&hs(2, 5000)), 2000);
        assert!(leaderboard_score(&hs(3, 999)) > leaderboard_score(&hs(2, 0)));
    }

    #[test]
    fn serializes_in_storage_shape() {
        let json = serde_json::to_string(&hs(7, 42)).unwrap();
        assert_eq!(json, r#"{"level":7,"moves":42}"#);
        let back: HighScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hs(7, 42));
    }
}
