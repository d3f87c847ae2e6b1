//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_catalog_summary, print_simulation_result, print_solve_result};
pub use formatters::share_text;
