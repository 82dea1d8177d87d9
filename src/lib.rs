//! Bounded Game of Life engine
//!
//! The engine is three pure operations over a finite grid with closed
//! boundaries: seed a random grid, step it one generation, and resize it.
//! A small host layer drives the engine from the console.

pub mod config;
pub mod game_of_life;
pub mod host;
pub mod utils;

pub use config::{ResizePolicy, Settings, Speed};
pub use game_of_life::{Grid, GridFactory, LifeEngine, PatternLoadFailure};
pub use host::{ConsoleHost, Simulation};
