//! Word Shift
//!
//! A word-unscrambling puzzle engine: rearrange scrambled letters into the
//! target word before the clock runs out, levelling up through longer words.
//!
//! # Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use word_shift::core::Direction;
//! use word_shift::game::{GameConfig, GameSession, SilentPlatform};
//! use word_shift::storage::MemoryStore;
//! use word_shift::wordlists::WordCatalog;
//!
//! let catalog = WordCatalog::embedded();
//! let mut session = GameSession::new(
//!     &catalog,
//!     GameConfig::default(),
//!     SilentPlatform,
//!     Box::new(MemoryStore::new()),
//!     StdRng::seed_from_u64(7),
//! )
//! .unwrap();
//!
//! session.start_new_game().unwrap();
//! session.on_letter_move(0, Direction::Forward).unwrap();
//! assert_eq!(session.moves(), 1);
//! ```

// Core puzzle types
pub mod core;

// Levels, clock and session orchestration
pub mod game;

// Automatic players
pub mod solver;

// Word lists
pub mod wordlists;

// Local high-score persistence
pub mod storage;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
