//! Word list loading utilities
//!
//! Provides functions to load word lists from files or use embedded constants.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file, one per line
///
/// Blank lines and entries that are not valid 4-8 letter words are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use word_shift::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words_5.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_lines(&content))
}

/// Parse newline-separated words, skipping invalid entries
#[must_use]
pub fn words_from_lines(content: &str) -> Vec<Word> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            Word::new(trimmed)
                .inspect_err(|e| log::debug!("skipping '{trimmed}': {e}"))
                .ok()
        })
        .collect()
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use word_shift::wordlists::loader::words_from_slice;
/// use word_shift::wordlists::WORDS_4;
///
/// let words = words_from_slice(WORDS_4);
/// assert_eq!(words.len(), WORDS_4.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_from_slice_converts_valid_words() {
        let input = &["shift", "LEVEL", "Puzzle"];
        let words = words_from_slice(input);

        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text(), "SHIFT");
        assert_eq!(words[1].text(), "LEVEL");
        assert_eq!(words[2].text(), "PUZZLE");
    }

    #[test]
    fn words_from_slice_skips_invalid() {
        let input = &["WORD", "ADVENTURE", "OWL", "GAME", "NO-GO"];
        let words = words_from_slice(input);

        // ADVENTURE is too long, OWL too short, NO-GO has punctuation
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "WORD");
        assert_eq!(words[1].text(), "GAME");
    }

    #[test]
    fn words_from_lines_skips_blanks() {
        let words = words_from_lines("  word \n\n\tgame\n  \n");
        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["WORD", "GAME"]);
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("word_shift_no_such_list.txt");
        assert!(load_from_file(path).is_err());
    }

    #[test]
    fn load_from_file_reads_words() {
        let path = std::env::temp_dir().join(format!(
            "word_shift_loader_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "planet\nocean\n123\n").unwrap();
        let words = load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "PLANET");
    }
}
