//! Word lists for Word Shift
//!
//! Provides embedded word lists compiled into the binary and the catalog that
//! buckets words by length for dealing.

mod embedded;
pub mod loader;

pub use embedded::{
    WORDS_4, WORDS_4_COUNT, WORDS_5, WORDS_5_COUNT, WORDS_6, WORDS_6_COUNT, WORDS_7,
    WORDS_7_COUNT, WORDS_8, WORDS_8_COUNT,
};

use crate::core::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, Word};
use crate::game::GameError;
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;

const BUCKETS: usize = MAX_WORD_LENGTH - MIN_WORD_LENGTH + 1;

/// Words bucketed by length, fixed after construction
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    buckets: [Vec<Word>; BUCKETS],
}

impl WordCatalog {
    /// Catalog of the embedded word lists
    #[must_use]
    pub fn embedded() -> Self {
        let lists: [&[&str]; BUCKETS] = [WORDS_4, WORDS_5, WORDS_6, WORDS_7, WORDS_8];
        Self::from_words(lists.iter().flat_map(|list| list.iter().copied()))
    }

    /// Build a catalog from arbitrary strings
    ///
    /// Invalid entries are skipped and duplicates kept once, in first-seen order.
    ///
    /// # Examples
    /// ```
    /// use word_shift::wordlists::WordCatalog;
    ///
    /// let catalog = WordCatalog::from_words(["word", "WORD", "shift", "owl"]);
    /// assert_eq!(catalog.words_of_length(4).len(), 1);
    /// assert_eq!(catalog.words_of_length(5).len(), 1);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid = words
            .into_iter()
            .filter_map(|s| Word::new(s.as_ref()).ok());
        Self::from_parsed(valid)
    }

    /// Build a catalog from already parsed words
    pub fn from_parsed<I: IntoIterator<Item = Word>>(words: I) -> Self {
        let mut catalog = Self::default();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for word in words {
            if seen.insert(word.text().to_string()) {
                catalog.buckets[word.len() - MIN_WORD_LENGTH].push(word);
            }
        }

        catalog
    }

    /// All words of length `n`; empty for lengths outside 4-8
    #[must_use]
    pub fn words_of_length(&self, n: usize) -> &[Word] {
        n.checked_sub(MIN_WORD_LENGTH)
            .and_then(|i| self.buckets.get(i))
            .map_or(&[], Vec::as_slice)
    }

    /// `(length, count)` for every supported length
    #[must_use]
    pub fn counts(&self) -> Vec<(usize, usize)> {
        (MIN_WORD_LENGTH..=MAX_WORD_LENGTH)
            .map(|n| (n, self.words_of_length(n).len()))
            .collect()
    }

    /// Total number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lengths that have no words at all
    #[must_use]
    pub fn missing_lengths(&self) -> Vec<usize> {
        self.counts()
            .into_iter()
            .filter(|&(_, count)| count == 0)
            .map(|(n, _)| n)
            .collect()
    }

    /// Pick a random word of length `length`
    ///
    /// Redraws while the pick equals `exclude`, unless it is the only word of
    /// that length.
    ///
    /// # Errors
    /// Returns `GameError::EmptyCategory` if there is no word of that length.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        length: usize,
        exclude: Option<&Word>,
        rng: &mut R,
    ) -> Result<&Word, GameError> {
        let words = self.words_of_length(length);
        if words.len() == 1 {
            return Ok(&words[0]);
        }

        loop {
            let word = words
                .choose(rng)
                .ok_or(GameError::EmptyCategory { length })?;
            if exclude != Some(word) {
                return Ok(word);
            }
        }
    }
}
