//! Game of Life core functionality

pub mod factory;
pub mod grid;
pub mod io;
pub mod rules;

pub use factory::{GridFactory, ALIVE_PROBABILITY};
pub use grid::{Grid, GridError};
pub use io::{create_example_patterns, load_pattern, save_pattern, PatternFormat, PatternLoadFailure};
pub use rules::LifeEngine;
