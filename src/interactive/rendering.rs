//! TUI rendering with ratatui
//!
//! Tiles, clock and overlays for the Word Shift interface.

use super::app::{App, MessageStyle};
use crate::core::TileClass;
use crate::game::SoundCue;
use crate::output::formatters::format_clock;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Width of one letter tile, borders included
const TILE_WIDTH: u16 = 7;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Level, moves, time
            Constraint::Length(5), // Tiles
            Constraint::Min(5),    // Messages
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_stats(f, app, chunks[1]);
    render_tiles(f, app, chunks[2]);
    render_messages(f, app, chunks[3]);
    render_status(f, app, chunks[4]);

    if app.session.is_over() {
        render_game_over(f, app);
    } else if let Some(level) = app.session.level_up_banner() {
        render_banner(f, &format!("🎉 LEVEL {level}! 🎉"), Color::Green);
    } else if app.session.is_paused() {
        render_banner(f, "⏸  PAUSED | press 'p' to resume", Color::Yellow);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let high = app.session.high_score();
    let header = Paragraph::new(format!(
        "🔀 WORD SHIFT | High score: level {} ({} moves)",
        high.level, high.moves
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let level = Paragraph::new(format!("Level {}", app.session.level()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(level, chunks[0]);

    let moves = Paragraph::new(format!("Moves {}", app.session.moves()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(moves, chunks[1]);

    let progression = app.session.progression();
    let seconds = progression.display_seconds();
    // Full bar at the starting time; bonuses can overfill it
    let ratio = (progression.time_left() / app.session.config().starting_time).clamp(0.0, 1.0);
    let color = if progression.is_low_time() {
        Color::Red
    } else {
        Color::Cyan
    };
    let gauge = Gauge::default()
        .block(Block::default().title(" Time ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format_clock(seconds));
    f.render_widget(gauge, chunks[2]);
}

fn render_tiles(f: &mut Frame, app: &App, area: Rect) {
    let (Some(round), Some(feedback)) = (app.session.round(), app.session.feedback()) else {
        let idle = Paragraph::new("Press 'n' to start a game")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(idle, area);
        return;
    };

    let letters = round.arrangement();
    let count = letters.len() as u16;
    let total_width = count * TILE_WIDTH;
    let left = area.x + area.width.saturating_sub(total_width) / 2;

    for (i, (&letter, &class)) in letters.iter().zip(feedback.tiles()).enumerate() {
        let x = left + i as u16 * TILE_WIDTH;
        if x + TILE_WIDTH > area.x + area.width {
            break;
        }
        let tile_area = Rect::new(x, area.y, TILE_WIDTH, area.height.min(5));
        let selected = i == app.cursor && !round.is_solved();
        render_tile(f, tile_area, letter, class, selected);
    }
}

fn render_tile(f: &mut Frame, area: Rect, letter: u8, class: TileClass, selected: bool) {
    let color = match class {
        TileClass::Correct => Color::Green,
        TileClass::Present => Color::Yellow,
        TileClass::Absent => Color::DarkGray,
    };
    let (border, border_style) = if selected {
        (
            BorderType::Thick,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Rounded, Style::default().fg(color))
    };

    let tile = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            char::from(letter).to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border)
            .border_style(border_style),
    );
    f.render_widget(tile, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(10)
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    let (cue_text, cue_color) = match app.last_cue {
        Some(SoundCue::Wrong) => ("♪ wrong", Color::Red),
        Some(SoundCue::Correct) => ("♪ correct", Color::Green),
        Some(SoundCue::LevelUp) => ("♪ level up", Color::Green),
        Some(SoundCue::GameOver) => ("♪ game over", Color::Red),
        Some(SoundCue::Move) => ("♪ move", Color::DarkGray),
        None => ("", Color::DarkGray),
    };
    let cue = Paragraph::new(cue_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(cue_color));
    f.render_widget(cue, chunks[0]);

    let help_text = if app.session.is_over() {
        "q: Quit | n: New Game | x: Share"
    } else {
        "←/→: Select | a/d or Shift+←/→: Move | h: Hint | s: Solve | p: Pause | n: New | q: Quit"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}

fn render_banner(f: &mut Frame, text: &str, color: Color) {
    let area = centered(f.area(), 50, 3);
    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(banner, area);
}

fn render_game_over(f: &mut Frame, app: &App) {
    let Some(summary) = app.session.summary() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Level reached:   {}", summary.level)),
        Line::from(format!("Words completed: {}", summary.words_completed)),
        Line::from(format!("Total moves:     {}", summary.moves)),
        Line::from(format!("Hints used:      {}", summary.hints)),
        Line::from(format!("High score:      {}", summary.high_score)),
    ];
    if summary.new_high_score {
        lines.push(Line::from(Span::styled(
            "🏆 New high score!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if app.show_share
        && let Some(text) = app.share()
    {
        lines.push(Line::from(""));
        lines.extend(text.lines().map(|l| Line::from(l.to_string())));
    }

    let height = lines.len() as u16 + 2;
    let area = centered(f.area(), 44, height);
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" n: play again | x: share ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::White)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
