//! Automatic players
//!
//! Strategies that choose moves for a round, used by the simulator and the
//! `solve` command.

pub mod strategy;

pub use strategy::{Action, HintingStrategy, InsertionStrategy, Strategy, StrategyType};
