//! Configuration settings for the simulation host

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub timing: TimingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub resize_policy: ResizePolicy,
    /// Fixed seed for reproducible runs; entropy is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// What happens to cells that appear when a grid grows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// New cells are alive with the same 1/4 probability as a fresh grid
    #[default]
    Reseed,
    /// New cells start dead
    Dead,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub tick_interval_ms: u64,
    pub frames_per_tick: u32,
    pub speed: Speed,
    /// Stop after this many generations; 0 runs until the grid dies out
    pub max_generations: u64,
}

/// Simulation speed multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    #[default]
    X1,
    X2,
    X4,
}

impl Speed {
    pub fn multiplier(self) -> u32 {
        match self {
            Speed::X1 => 1,
            Speed::X2 => 2,
            Speed::X4 => 4,
        }
    }

    /// 1x -> 2x -> 4x -> 1x
    pub fn next(self) -> Self {
        match self {
            Speed::X1 => Speed::X2,
            Speed::X2 => Speed::X4,
            Speed::X4 => Speed::X1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub style: OutputStyle,
    pub clear_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    Compact,
    Coords,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 24,
                cols: 64,
                resize_policy: ResizePolicy::Reseed,
                seed: None,
            },
            timing: TimingConfig {
                tick_interval_ms: 100,
                frames_per_tick: 4,
                speed: Speed::X1,
                max_generations: 0,
            },
            input: InputConfig::default(),
            output: OutputConfig {
                style: OutputStyle::Compact,
                clear_screen: true,
            },
        }
    }
}

impl TimingConfig {
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.timing.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.timing.frames_per_tick == 0 {
            anyhow::bail!("Frames per tick must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.simulation.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.simulation.cols = cols;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(speed) = cli_overrides.speed {
            self.timing.speed = speed;
        }
        if let Some(generations) = cli_overrides.max_generations {
            self.timing.max_generations = generations;
        }
        if let Some(ref pattern) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed: Option<u64>,
    pub speed: Option<Speed>,
    pub max_generations: Option<u64>,
    pub pattern_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let mut settings = Settings::default();
        settings.timing.tick_interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.timing.frames_per_tick = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.seed = Some(17);
        settings.simulation.resize_policy = ResizePolicy::Dead;
        settings.timing.speed = Speed::X4;
        settings.to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("resize_policy: dead"));
        assert!(text.contains("speed: x4"));

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_optional_fields_default() {
        let yaml = "
simulation: { rows: 3, cols: 4, resize_policy: reseed }
timing: { tick_interval_ms: 50, frames_per_tick: 2, speed: x2, max_generations: 10 }
input: {}
output: { style: coords, clear_screen: false }
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.simulation.seed, None);
        assert_eq!(settings.input.pattern_file, None);
        assert_eq!(settings.output.style, OutputStyle::Coords);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::load_or_default(temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            rows: Some(5),
            seed: Some(9),
            speed: Some(Speed::X2),
            pattern_file: Some(PathBuf::from("p.json")),
            ..Default::default()
        });

        assert_eq!(settings.simulation.rows, 5);
        assert_eq!(settings.simulation.cols, 64);
        assert_eq!(settings.simulation.seed, Some(9));
        assert_eq!(settings.timing.speed, Speed::X2);
        assert_eq!(settings.input.pattern_file, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_speed_cycle() {
        assert_eq!(Speed::X1.next(), Speed::X2);
        assert_eq!(Speed::X2.next(), Speed::X4);
        assert_eq!(Speed::X4.next(), Speed::X1);
        assert_eq!(Speed::X4.multiplier(), 4);
    }
}
