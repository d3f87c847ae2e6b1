//! Core puzzle types for Word Shift
//!
//! Words, scrambling, tile feedback and the round state machine. Everything here
//! is deterministic given an injected random source.

mod feedback;
mod round;
mod scramble;
mod word;

pub use feedback::{Feedback, FeedbackCue, TileClass};
pub use round::{Direction, MoveResult, PuzzleRound, Rejection, RoundState};
pub use scramble::{Scramble, ScrambleError, scramble};
pub use word::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, Word, WordError};
