//! Derangement-seeking scramble
//!
//! Shuffles a word's letters until the arrangement differs from the word itself.

use super::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// A scrambled arrangement of a word's letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    /// The shuffled letters (same multiset as the word)
    pub letters: Vec<u8>,
    /// Number of full shuffles drawn before one differed from the word
    pub attempts: u32,
}

/// Why a word could not be scrambled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleError {
    /// Every permutation of the letters equals the word (one repeated letter)
    Degenerate,
}

impl fmt::Display for ScrambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate => write!(f, "no scramble possible: word has a single distinct letter"),
        }
    }
}

impl std::error::Error for ScrambleError {}

/// Scramble a word into an arrangement guaranteed to differ from it
///
/// Each attempt is a full Fisher-Yates shuffle of a fresh copy of the word, so
/// the expected number of attempts only depends on how many permutations map
/// back onto the word (duplicate letters).
///
/// # Errors
/// Returns `ScrambleError::Degenerate` when the word has fewer than two distinct
/// letters. Callers keep the word unscrambled in that case.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use word_shift::core::{Word, scramble};
///
/// let word = Word::new("WORD").unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let scramble = scramble(&word, &mut rng).unwrap();
/// assert_ne!(scramble.letters.as_slice(), word.chars());
/// ```
pub fn scramble<R: Rng + ?Sized>(word: &Word, rng: &mut R) -> Result<Scramble, ScrambleError> {
    if word.len() < 2 || word.distinct_letters() < 2 {
        return Err(ScrambleError::Degenerate);
    }

    let mut attempts = 0;
    loop {
        attempts += 1;
        let mut letters = word.chars().to_vec();
        letters.shuffle(rng);
        if letters.as_slice() != word.chars() {
            return Ok(Scramble { letters, attempts });
        }
    }
}
