//! Host adapter: owns the current grid, cadence and console rendering

pub mod console;
pub mod simulation;

pub use console::{ConsoleHost, RunSummary, StopReason};
pub use simulation::Simulation;
