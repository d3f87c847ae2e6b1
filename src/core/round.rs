//! Puzzle round state machine
//!
//! A round holds one target word and the player's current arrangement of its
//! letters. It is `InProgress` until the arrangement spells the word, then
//! `Solved`. The state is re-evaluated after every mutation.

use super::{Feedback, ScrambleError, Word, scramble};
use crate::game::GameError;
use crate::wordlists::WordCatalog;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;

/// Which neighbour a tile swaps with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Neighbour index of `index` in an arrangement of `len` tiles, wrapping circularly
    #[inline]
    #[must_use]
    pub const fn neighbour(self, index: usize, len: usize) -> usize {
        match self {
            Self::Forward => (index + 1) % len,
            Self::Backward => (index + len - 1) % len,
        }
    }
}

/// Round state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Solved,
}

/// Reason an operation was refused without changing any state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No game has been started yet
    NotStarted,
    /// The game has ended
    GameOver,
    /// The countdown is paused
    Paused,
    /// The round is already solved and waiting for the next word
    RoundSolved,
    /// Not enough time left to pay the hint penalty
    InsufficientTime,
    /// Every tile is already in its correct position
    AlreadyCorrect,
    /// Tile index outside the arrangement
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "no game in progress"),
            Self::GameOver => write!(f, "the game is over"),
            Self::Paused => write!(f, "the game is paused"),
            Self::RoundSolved => write!(f, "the word is already solved"),
            Self::InsufficientTime => write!(f, "not enough time for a hint"),
            Self::AlreadyCorrect => write!(f, "all letters are in correct positions"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "tile {index} is outside a {len}-letter word")
            }
        }
    }
}

/// Result of a successful move or hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Arrangement after the swap
    pub arrangement: Vec<u8>,
    /// The two positions that were swapped
    pub swapped: (usize, usize),
    /// Whether the round is now solved
    pub solved: bool,
}

/// One word-guessing attempt, from scramble to solve
#[derive(Debug, Clone)]
pub struct PuzzleRound {
    word: Word,
    arrangement: Vec<u8>,
    move_count: u32,
    hints_used: u32,
    state: RoundState,
}

impl PuzzleRound {
    /// Start a round for `word` with an explicit arrangement
    ///
    /// # Panics
    /// Panics in debug mode if `arrangement` is not a permutation of the word.
    #[must_use]
    pub fn with_arrangement(word: Word, arrangement: Vec<u8>) -> Self {
        debug_assert!(word.is_anagram(&arrangement));
        let state = if arrangement.as_slice() == word.chars() {
            RoundState::Solved
        } else {
            RoundState::InProgress
        };
        Self {
            word,
            arrangement,
            move_count: 0,
            hints_used: 0,
            state,
        }
    }

    /// Start a round for `word`, scrambling its letters
    ///
    /// A word that cannot be scrambled is dealt unscrambled.
    pub fn from_word<R: Rng + ?Sized>(word: Word, rng: &mut R) -> Self {
        let arrangement = match scramble(&word, rng) {
            Ok(scramble) => scramble.letters,
            Err(ScrambleError::Degenerate) => {
                log::warn!("word {word} cannot be scrambled, dealing it as is");
                word.chars().to_vec()
            }
        };
        Self::with_arrangement(word, arrangement)
    }

    /// Pick a word of `length` from the catalog and scramble it
    ///
    /// The immediately preceding word is redrawn unless it is the only word of
    /// that length.
    ///
    /// # Errors
    /// Returns `GameError::EmptyCategory` when the catalog has no word of `length`.
    pub fn select<R: Rng + ?Sized>(
        catalog: &WordCatalog,
        length: usize,
        previous: Option<&Word>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let word = catalog.pick(length, previous, rng)?.clone();
        Ok(Self::from_word(word, rng))
    }

    /// The target word
    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    /// Current arrangement of the letters
    #[must_use]
    pub fn arrangement(&self) -> &[u8] {
        &self.arrangement
    }

    /// Current arrangement as a string
    #[must_use]
    pub fn arrangement_text(&self) -> String {
        String::from_utf8_lossy(&self.arrangement).into_owned()
    }

    /// Moves made in this round
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Hints used in this round
    #[must_use]
    pub const fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.state == RoundState::Solved
    }

    /// Positions whose letter differs from the target
    #[must_use]
    pub fn incorrect_positions(&self) -> Vec<usize> {
        self.arrangement
            .iter()
            .zip(self.word.chars())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }

    /// Swap the tile at `index` with its neighbour in `direction`
    ///
    /// Moving the first tile backward swaps it with the last one.
    ///
    /// # Errors
    /// `Rejection::RoundSolved` once solved, `Rejection::IndexOutOfRange` for a bad index.
    pub fn move_letter(&mut self, index: usize, direction: Direction) -> Result<MoveResult, Rejection> {
        if self.is_solved() {
            return Err(Rejection::RoundSolved);
        }
        let len = self.arrangement.len();
        if index >= len {
            return Err(Rejection::IndexOutOfRange { index, len });
        }

        let target = direction.neighbour(index, len);
        self.arrangement.swap(index, target);
        self.move_count += 1;
        self.refresh_state();

        Ok(MoveResult {
            arrangement: self.arrangement.clone(),
            swapped: (index, target),
            solved: self.is_solved(),
        })
    }

    /// Put one wrong position right
    ///
    /// Picks an incorrect position at random, then swaps it with the first
    /// position (scanning from the start) holding the letter it needs. With
    /// duplicate letters that first occurrence may already sit in a correct
    /// slot, in which case the hint moves the error instead of removing it.
    ///
    /// # Errors
    /// `Rejection::RoundSolved` once solved, `Rejection::AlreadyCorrect` when no position is wrong.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<MoveResult, Rejection> {
        if self.is_solved() {
            return Err(Rejection::RoundSolved);
        }
        let incorrect = self.incorrect_positions();
        let &hint_index = incorrect.choose(rng).ok_or(Rejection::AlreadyCorrect)?;
        Ok(self.apply_hint_at(hint_index))
    }

    fn apply_hint_at(&mut self, hint_index: usize) -> MoveResult {
        let needed = self.word.char_at(hint_index);
        // The letter is guaranteed to be somewhere in a permutation of the word
        let source = self
            .arrangement
            .iter()
            .position(|&letter| letter == needed)
            .unwrap_or(hint_index);

        self.arrangement.swap(hint_index, source);
        self.hints_used += 1;
        self.refresh_state();

        MoveResult {
            arrangement: self.arrangement.clone(),
            swapped: (hint_index, source),
            solved: self.is_solved(),
        }
    }

    /// Reveal the word without counting a move
    pub fn solve_immediately(&mut self) {
        self.arrangement = self.word.chars().to_vec();
        self.refresh_state();
    }

    /// Tile feedback for the current arrangement
    #[must_use]
    pub fn feedback(&self, previous: Option<&Feedback>) -> Feedback {
        Feedback::scan(&self.arrangement, &self.word, previous)
    }

    fn refresh_state(&mut self) {
        self.state = if self.arrangement.as_slice() == self.word.chars() {
            RoundState::Solved
        } else {
            RoundState::InProgress
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn round(word: &str, arrangement: &str) -> PuzzleRound {
        PuzzleRound::with_arrangement(
            Word::new(word).unwrap(),
            arrangement.as_bytes().to_vec(),
        )
    }

    #[test]
    fn neighbour_wraps_circularly() {
        assert_eq!(Direction::Forward.neighbour(3, 4), 0);
        assert_eq!(Direction::Backward.neighbour(0, 4), 3);
        assert_eq!(Direction::Forward.neighbour(1, 4), 2);
        assert_eq!(Direction::Backward.neighbour(2, 4), 1);
    }

    #[test]
    fn move_swaps_exactly_two_positions() {
        let mut r = round("SHIFT", "FTISH");
        let before = r.arrangement().to_vec();
        let result = r.move_letter(1, Direction::Forward).unwrap();

        let differing: Vec<usize> = (0..before.len())
            .filter(|&i| before[i] != result.arrangement[i])
            .collect();
        assert_eq!(differing, vec![1, 2]);
        assert!(r.word().is_anagram(&result.arrangement));
        assert_eq!(r.move_count(), 1);
    }

    #[test]
    fn move_first_backward_swaps_with_last() {
        let mut r = round("WORD", "DORW");
        let result = r.move_letter(0, Direction::Backward).unwrap();
        assert_eq!(result.swapped, (0, 3));
        assert_eq!(result.arrangement, b"WORD");
        assert!(result.solved);
        assert_eq!(r.state(), RoundState::Solved);
    }

    #[test]
    fn move_rejected_out_of_range() {
        let mut r = round("WORD", "DROW");
        assert_eq!(
            r.move_letter(4, Direction::Forward),
            Err(Rejection::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(r.move_count(), 0);
        assert_eq!(r.arrangement(), b"DROW");
    }

    #[test]
    fn move_rejected_once_solved() {
        let mut r = round("WORD", "OWRD");
        r.move_letter(0, Direction::Forward).unwrap();
        assert!(r.is_solved());
        assert_eq!(r.move_letter(0, Direction::Forward), Err(Rejection::RoundSolved));
        assert_eq!(r.move_count(), 1);
    }

    #[test]
    fn hint_on_fully_wrong_arrangement_fixes_two_positions() {
        // Every position of DROW differs from WORD
        let mut r = round("WORD", "DROW");
        assert_eq!(r.incorrect_positions(), vec![0, 1, 2, 3]);

        let mut rng = StdRng::seed_from_u64(3);
        r.use_hint(&mut rng).unwrap();
        assert_eq!(r.incorrect_positions().len(), 2);
        assert_eq!(r.hints_used(), 1);
        assert_eq!(r.move_count(), 0);
    }

    #[test]
    fn hint_on_swapped_pair_solves() {
        // OWRD has only positions 0 and 1 wrong; one hint fixes both at once
        let mut r = round("WORD", "OWRD");
        assert_eq!(r.incorrect_positions(), vec![0, 1]);
        let result = r.use_hint(&mut StdRng::seed_from_u64(11)).unwrap();
        assert!(result.solved);
    }

    #[test]
    fn hint_takes_first_occurrence_even_if_correct() {
        // BOOK arranged as KOBO: position 1 already holds a correct O.
        // Hinting position 3 needs a K, found at index 0.
        let mut r = round("BOOK", "KOBO");
        let result = r.apply_hint_at(3);
        assert_eq!(result.swapped, (3, 0));
        assert_eq!(r.arrangement(), b"OOBK");

        // Hinting position 2 (needs O) finds the O at index 0 first
        let result = r.apply_hint_at(2);
        assert_eq!(result.swapped, (2, 0));
        assert_eq!(r.arrangement(), b"BOOK");
        assert!(r.is_solved());
    }

    #[test]
    fn hint_first_occurrence_can_break_a_correct_slot() {
        // Position 2 needs an O; the first O sits at index 1, already correct.
        let mut r = round("BOOK", "BOKO");
        assert_eq!(r.incorrect_positions(), vec![2, 3]);
        let result = r.apply_hint_at(2);
        assert_eq!(result.swapped, (2, 1));
        assert_eq!(r.arrangement(), b"BKOO");
        assert_eq!(r.incorrect_positions(), vec![1, 3]);
        assert_eq!(r.hints_used(), 1);
    }

    #[test]
    fn hint_never_increases_wrong_positions() {
        let mut rng = StdRng::seed_from_u64(21);
        for arrangement in ["DROW", "ROWD", "WDRO", "OWDR"] {
            let mut r = round("WORD", arrangement);
            let before = r.incorrect_positions().len();
            r.use_hint(&mut rng).unwrap();
            let after = r.incorrect_positions().len();
            assert!(after < before, "{arrangement}: {before} -> {after}");
        }
    }

    #[test]
    fn hint_rejected_when_solved() {
        let mut r = round("WORD", "OWRD");
        r.solve_immediately();
        assert_eq!(
            r.use_hint(&mut StdRng::seed_from_u64(1)),
            Err(Rejection::RoundSolved)
        );
    }

    #[test]
    fn hint_reports_already_correct_for_unscrambled_round() {
        // A degenerate word is dealt unscrambled and starts out solved
        let mut r = PuzzleRound::from_word(Word::new("AAAA").unwrap(), &mut StdRng::seed_from_u64(1));
        assert!(r.is_solved());
        assert_eq!(r.incorrect_positions(), Vec::<usize>::new());
        r.state = RoundState::InProgress;
        assert_eq!(
            r.use_hint(&mut StdRng::seed_from_u64(1)),
            Err(Rejection::AlreadyCorrect)
        );
    }

    #[test]
    fn solve_immediately_keeps_move_count() {
        let mut r = round("SHIFT", "FTISH");
        r.move_letter(0, Direction::Forward).unwrap();
        r.solve_immediately();
        assert!(r.is_solved());
        assert_eq!(r.arrangement(), b"SHIFT");
        assert_eq!(r.move_count(), 1);
    }

    #[test]
    fn select_resets_counters_and_scrambles() {
        let catalog = WordCatalog::from_words(["WORD", "PLAY", "GAME"]);
        let mut rng = StdRng::seed_from_u64(8);
        let r = PuzzleRound::select(&catalog, 4, None, &mut rng).unwrap();
        assert_eq!(r.move_count(), 0);
        assert_eq!(r.hints_used(), 0);
        assert!(!r.is_solved());
        assert!(r.word().is_anagram(r.arrangement()));
    }

    #[test]
    fn select_fails_on_empty_length() {
        let catalog = WordCatalog::from_words(["WORD"]);
        let mut rng = StdRng::seed_from_u64(8);
        assert!(matches!(
            PuzzleRound::select(&catalog, 6, None, &mut rng),
            Err(GameError::EmptyCategory { length: 6 })
        ));
    }
}
