//! Display functions for command results

use super::formatters::tiles_to_emoji;
use crate::commands::{SimulationResult, SolveResult};
use crate::core::Direction;
use crate::solver::Action;
use crate::wordlists::WordCatalog;
use colored::Colorize;

/// Print the steps taken to unscramble a word
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Unscrambling: {} → {}",
        result.start.bright_yellow().bold(),
        result.target.bright_green().bold()
    );
    println!("{}", "─".repeat(60).cyan());
    println!(
        "\nStart:   {} {}",
        result.start,
        tiles_to_emoji(&result.start_tiles)
    );

    for (i, step) in result.steps.iter().enumerate() {
        let label = match step.action {
            Action::Move { index, direction } => {
                let arrow = match direction {
                    Direction::Forward => "→",
                    Direction::Backward => "←",
                };
                format!("move {} {arrow}", index + 1)
            }
            Action::Hint => "hint".to_string(),
        };
        println!(
            "Step {:>2}: {} {}  ({label})",
            i + 1,
            step.arrangement,
            tiles_to_emoji(&step.tiles)
        );
        if verbose && step.newly_correct > 0 {
            println!("         +{} correct", step.newly_correct);
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} steps!", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not solved after {} steps", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print the word counts per length
pub fn print_catalog_summary(catalog: &WordCatalog) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "WORD CATALOG".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let max = catalog
        .counts()
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(0)
        .max(1);
    for (length, count) in catalog.counts() {
        let bar_len = count * 40 / max;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        let line = format!("   {length} letters: {bar} {count:4}");
        if count == 0 {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    println!("\n   Total: {}", catalog.len().to_string().bright_yellow().bold());

    let missing = catalog.missing_lengths();
    if !missing.is_empty() {
        println!(
            "\n   {} games stop when they reach these lengths: {missing:?}",
            "⚠".yellow()
        );
    }
}

/// Print the result of a simulation
pub fn print_simulation_result(result: &SimulationResult, strategy: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let played = result.games.len();
    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Strategy:         {strategy}");
    println!("   Games played:     {played}");
    if result.failed > 0 {
        println!(
            "   Failed:           {}",
            result.failed.to_string().red()
        );
    }
    println!(
        "   Average level:    {}",
        format!("{:.2}", result.average_level)
            .bright_yellow()
            .bold()
    );
    println!("   Average moves:    {:.1}", result.average_moves);
    println!("   Average hints:    {:.1}", result.average_hints);
    if result.capped > 0 {
        println!(
            "   Hit level cap:    {}",
            result.capped.to_string().yellow()
        );
    }
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());

    if let Some(best) = &result.best {
        println!(
            "\n✨ {} level {} in {} moves (seed {})",
            "Best game:".green().bold(),
            best.level,
            best.moves,
            best.seed
        );
    }

    if played == 0 {
        return;
    }

    println!("\n📈 {}", "Level reached:".bright_cyan().bold());
    let mut levels: Vec<(u32, usize)> = result
        .level_distribution
        .iter()
        .map(|(&level, &count)| (level, count))
        .collect();
    levels.sort_unstable();
    for (level, count) in levels {
        let pct = (count as f64 / played as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {level:>2}: {bar} {count:4} ({pct:5.1}%)");
    }
}
