//! Formatting utilities for terminal output

use crate::core::TileClass;
use crate::game::GameSummary;

/// Format tile feedback as an emoji string
#[must_use]
pub fn tiles_to_emoji(tiles: &[TileClass]) -> String {
    tiles
        .iter()
        .map(|tile| match tile {
            TileClass::Correct => '🟩',
            TileClass::Present => '🟨',
            TileClass::Absent => '⬜',
        })
        .collect()
}

/// Format whole seconds as `m:ss`
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Text a player can paste to share a finished game
///
/// # Examples
/// ```
/// use word_shift::game::{GameSummary, HighScore};
/// use word_shift::output::formatters::share_text;
///
/// let summary = GameSummary {
///     level: 4,
///     words_completed: 3,
///     moves: 37,
///     hints: 0,
///     high_score: HighScore { level: 6, moves: 51 },
///     new_high_score: false,
/// };
/// assert!(share_text(&summary).contains("Level 4"));
/// ```
#[must_use]
pub fn share_text(summary: &GameSummary) -> String {
    format!(
        "🎮 Word Shift Score:\n\
         📊 Level {}\n\
         📝 Words Completed: {}\n\
         🎯 Total Moves: {}\n\
         🏆 High Score: Level {}\n\
         🎮 Play Word Shift now!",
        summary.level, summary.words_completed, summary.moves, summary.high_score.level
    )
}
