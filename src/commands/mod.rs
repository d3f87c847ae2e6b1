//! Command implementations

pub mod simulate;
pub mod solve;

pub use simulate::{PlayedGame, SimulationConfig, SimulationResult, play_game, run_simulation};
pub use solve::{SolveConfig, SolveResult, SolveStep, solve_word};
