//! Configuration management for the simulation host

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputStyle, ResizePolicy, Settings,
    SimulationConfig, Speed, TimingConfig,
};
