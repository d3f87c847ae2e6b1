//! Tile feedback for the current arrangement
//!
//! Each tile is classified against the target word:
//! - Correct: letter matches the target at the same position
//! - Present: letter occurs elsewhere in the target
//! - Absent: letter does not occur in the target
//!
//! The scan also decides which sound cues a rearrangement earns. It is a single
//! left-to-right fold carrying a "correct tile seen" flag: the wrong cue can only
//! fire before the first correct tile, and fires at most once per scan.

use super::Word;

/// Classification of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileClass {
    Correct,
    Present,
    Absent,
}

impl TileClass {
    /// Classify `letter` sitting at `position` against `target`
    #[inline]
    #[must_use]
    pub fn classify(letter: u8, position: usize, target: &Word) -> Self {
        if target.char_at(position) == letter {
            Self::Correct
        } else if target.has_letter(letter) {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

/// A cue earned by one tile, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCue {
    /// The tile at this index just became correct
    NewlyCorrect(usize),
    /// No tile was correct yet when this wrong tile was scanned
    Wrong(usize),
}

/// Feedback for a whole arrangement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    tiles: Vec<TileClass>,
    cues: Vec<FeedbackCue>,
}

/// Fold accumulator for the scan
#[derive(Default)]
struct Scan {
    tiles: Vec<TileClass>,
    cues: Vec<FeedbackCue>,
    seen_correct: bool,
    wrong_fired: bool,
}

impl Feedback {
    /// Scan `arrangement` against `target`
    ///
    /// `previous` is the feedback shown before this change. Tiles that were
    /// already correct do not trigger cues again.
    ///
    /// # Examples
    /// ```
    /// use word_shift::core::{Feedback, TileClass, Word};
    ///
    /// let target = Word::new("WORD").unwrap();
    /// let feedback = Feedback::scan(b"WODR", &target, None);
    /// assert_eq!(feedback.tiles()[0], TileClass::Correct);
    /// assert_eq!(feedback.tiles()[2], TileClass::Present);
    /// assert_eq!(feedback.wrong_cue_at(), None);
    /// ```
    #[must_use]
    pub fn scan(arrangement: &[u8], target: &Word, previous: Option<&Self>) -> Self {
        let was_correct =
            |i: usize| previous.is_some_and(|p| p.tiles.get(i) == Some(&TileClass::Correct));

        let scan = arrangement
            .iter()
            .enumerate()
            .fold(Scan::default(), |mut acc, (i, &letter)| {
                let class = TileClass::classify(letter, i, target);
                match class {
                    TileClass::Correct => {
                        if !was_correct(i) {
                            acc.cues.push(FeedbackCue::NewlyCorrect(i));
                        }
                        acc.seen_correct = true;
                    }
                    TileClass::Present | TileClass::Absent => {
                        if !acc.seen_correct && !was_correct(i) && !acc.wrong_fired {
                            acc.cues.push(FeedbackCue::Wrong(i));
                            acc.wrong_fired = true;
                        }
                    }
                }
                acc.tiles.push(class);
                acc
            });

        Self {
            tiles: scan.tiles,
            cues: scan.cues,
        }
    }

    /// Per-tile classification, in arrangement order
    #[must_use]
    pub fn tiles(&self) -> &[TileClass] {
        &self.tiles
    }

    /// Cues earned by this scan, in tile order
    #[must_use]
    pub fn cues(&self) -> &[FeedbackCue] {
        &self.cues
    }

    /// Index of the tile that fired the wrong cue, if it fired
    #[must_use]
    pub fn wrong_cue_at(&self) -> Option<usize> {
        self.cues.iter().find_map(|cue| match *cue {
            FeedbackCue::Wrong(i) => Some(i),
            FeedbackCue::NewlyCorrect(_) => None,
        })
    }

    /// Number of tiles that turned correct since the previous scan
    #[must_use]
    pub fn newly_correct(&self) -> usize {
        self.cues
            .iter()
            .filter(|cue| matches!(cue, FeedbackCue::NewlyCorrect(_)))
            .count()
    }

    /// Number of correct tiles
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.tiles
            .iter()
            .filter(|&&t| t == TileClass::Correct)
            .count()
    }

    /// All tiles correct
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(|&t| t == TileClass::Correct)
    }
}
