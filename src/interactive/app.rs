//! TUI application state and logic

use crate::core::{Direction, Rejection};
use crate::game::{GameSession, OfflinePlatform, RewardOutcome, SessionEvent, SoundCue};
use crate::output::share_text;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// How often the UI redraws while waiting for input
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Session type driven by the TUI
pub type TuiSession<'a> = GameSession<'a, OfflinePlatform, StdRng>;

/// Application state
pub struct App<'a> {
    pub session: TuiSession<'a>,
    /// Selected tile
    pub cursor: usize,
    pub messages: Vec<Message>,
    /// Last sound cue, shown as a status flash
    pub last_cue: Option<SoundCue>,
    pub show_share: bool,
    pub should_quit: bool,
    bell: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(session: TuiSession<'a>) -> Self {
        Self {
            session,
            cursor: 0,
            messages: vec![Message {
                text: "Rearrange the letters before time runs out!".to_string(),
                style: MessageStyle::Info,
            }],
            last_cue: None,
            show_share: false,
            should_quit: false,
            bell: false,
        }
    }

    pub fn new_game(&mut self) {
        self.show_share = false;
        self.cursor = 0;
        match self.session.start_new_game() {
            Ok(()) => {
                let high = self.session.high_score();
                self.add_message(
                    &format!("New game! Best so far: {high}"),
                    MessageStyle::Info,
                );
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
        self.process_session_output();
    }

    /// Advance the session clock and collect its output
    pub fn update(&mut self, now: Duration) {
        self.session.advance_to(now);
        self.process_session_output();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('p') => self.toggle_pause(),
            KeyCode::Left if shift => self.move_tile(Direction::Backward),
            KeyCode::Right if shift => self.move_tile(Direction::Forward),
            KeyCode::Char('a' | 'A') => self.move_tile(Direction::Backward),
            KeyCode::Char('d' | 'D') => self.move_tile(Direction::Forward),
            KeyCode::Left => self.move_cursor(Direction::Backward),
            KeyCode::Right => self.move_cursor(Direction::Forward),
            KeyCode::Char('h') => self.hint(),
            KeyCode::Char('s') => self.solve(),
            KeyCode::Char('x') if self.session.is_over() => self.show_share = !self.show_share,
            _ => {}
        }
        self.process_session_output();
    }

    /// Terminal focus stands in for page visibility
    pub fn handle_focus(&mut self, focused: bool) {
        if focused {
            self.session.on_visibility_resume();
        } else {
            self.session.on_visibility_pause();
        }
        self.process_session_output();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Whether a bell is owed since the last call
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    fn word_len(&self) -> usize {
        self.session.round().map_or(0, |r| r.arrangement().len())
    }

    fn move_cursor(&mut self, direction: Direction) {
        let len = self.word_len();
        if len > 0 {
            self.cursor = direction.neighbour(self.cursor, len);
        }
    }

    fn move_tile(&mut self, direction: Direction) {
        match self.session.on_letter_move(self.cursor, direction) {
            // The selection follows the moved letter
            Ok(result) => self.cursor = result.swapped.1,
            Err(rejection) => self.reject(rejection),
        }
    }

    fn hint(&mut self) {
        match self.session.on_hint_requested() {
            Ok(_) => {
                let penalty = self.session.config().hint_penalty;
                self.add_message(&format!("Hint used: -{penalty:.0}s"), MessageStyle::Info);
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    fn solve(&mut self) {
        match self.session.on_solve_requested() {
            Ok(RewardOutcome::Granted) => {
                self.add_message("Word revealed, skipping ahead", MessageStyle::Success);
            }
            Ok(RewardOutcome::Declined | RewardOutcome::Failed) => {
                self.add_message("No reward, here is a fresh word", MessageStyle::Info);
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    fn toggle_pause(&mut self) {
        if self.session.is_paused() {
            self.session.on_visibility_resume();
        } else {
            self.session.on_visibility_pause();
        }
    }

    fn reject(&mut self, rejection: Rejection) {
        let text = match rejection {
            Rejection::InsufficientTime => "Not enough time for a hint!".to_string(),
            Rejection::NotStarted => "Press 'n' to start".to_string(),
            other => other.to_string(),
        };
        self.add_message(&text, MessageStyle::Error);
    }

    fn process_session_output(&mut self) {
        for cue in self.session.platform_mut().drain_cues() {
            if matches!(cue, SoundCue::Wrong | SoundCue::GameOver) {
                self.bell = true;
            }
            self.last_cue = Some(cue);
        }

        for event in self.session.drain_events() {
            match event {
                SessionEvent::RoundStarted { word_length, .. } => {
                    self.cursor = 0;
                    log::debug!("showing a {word_length}-letter word");
                }
                SessionEvent::RoundSolved { .. } => {
                    self.add_message("Solved!", MessageStyle::Success);
                }
                SessionEvent::LevelUp { level, word_length } => {
                    self.add_message(
                        &format!("Level {level}! Next words: {word_length} letters"),
                        MessageStyle::Success,
                    );
                }
                SessionEvent::Paused => self.add_message("Paused", MessageStyle::Info),
                SessionEvent::Resumed => self.add_message("Resumed", MessageStyle::Info),
                SessionEvent::CannotContinue(e) => {
                    self.add_message(&e.to_string(), MessageStyle::Error);
                }
                SessionEvent::GameOver(summary) => {
                    self.add_message(
                        &format!("Game over at level {}", summary.level),
                        MessageStyle::Info,
                    );
                    if summary.new_high_score {
                        self.add_message("🏆 New high score!", MessageStyle::Success);
                    }
                    self.add_message("Press 'x' to share, 'n' to play again", MessageStyle::Info);
                }
                SessionEvent::TilesChanged | SessionEvent::LevelUpDismissed => {}
            }
        }
    }

    /// Share text for the last finished game
    #[must_use]
    pub fn share(&self) -> Option<String> {
        self.session.summary().map(share_text)
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let start = Instant::now();
    app.new_game();

    loop {
        app.update(start.elapsed());
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if app.take_bell() && app.session.platform().sound_enabled {
            let mut stdout = io::stdout();
            stdout.write_all(b"\x07")?;
            stdout.flush()?;
        }

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::FocusLost => app.handle_focus(false),
                Event::FocusGained => app.handle_focus(true),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
