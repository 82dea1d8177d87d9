//! Plain console host: prints each generation and sleeps between ticks

use super::Simulation;
use crate::config::{OutputConfig, Settings};
use crate::utils::GridFormatter;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Why a console run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GenerationLimit,
    Extinct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub final_population: usize,
    pub stop_reason: StopReason,
}

pub struct ConsoleHost {
    simulation: Simulation,
    output: OutputConfig,
    max_generations: u64,
}

impl ConsoleHost {
    pub fn new(settings: &Settings) -> Self {
        Self::with_simulation(Simulation::new(settings), settings)
    }

    pub fn with_simulation(simulation: Simulation, settings: &Settings) -> Self {
        Self {
            simulation,
            output: settings.output.clone(),
            max_generations: settings.timing.max_generations,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Render, sleep, tick until the generation limit or until nothing is alive
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let stop_reason = loop {
            self.render(out)?;

            if self.max_generations > 0 && self.simulation.generation() >= self.max_generations {
                break StopReason::GenerationLimit;
            }
            if self.simulation.population() == 0 {
                break StopReason::Extinct;
            }

            std::thread::sleep(self.simulation.tick_interval());
            self.simulation.tick();
        };

        let summary = RunSummary {
            generations: self.simulation.generation(),
            final_population: self.simulation.population(),
            stop_reason,
        };
        info!(
            generations = summary.generations,
            population = summary.final_population,
            reason = ?summary.stop_reason,
            "run finished"
        );
        Ok(summary)
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let sim = &self.simulation;
        if self.output.clear_screen {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(
            out,
            "{}",
            GridFormatter::format_status(
                sim.generation(),
                sim.population(),
                sim.speed().multiplier(),
                sim.is_running()
            )
        )?;
        out.write_all(GridFormatter::format_grid(sim.grid(), self.output.style).as_bytes())?;
        out.flush().context("Failed to flush console output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputStyle, ResizePolicy};
    use crate::game_of_life::Grid;

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        settings.timing.tick_interval_ms = 1;
        settings.output.clear_screen = false;
        settings.output.style = OutputStyle::Compact;
        settings.simulation.resize_policy = ResizePolicy::Dead;
        settings.simulation.seed = Some(5);
        settings
    }

    #[test]
    fn test_run_stops_at_generation_limit() {
        let mut settings = quiet_settings();
        settings.timing.max_generations = 2;

        let blinker = Grid::from_cells(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap();
        let sim = Simulation::with_grid(blinker.clone(), &settings);
        let mut host = ConsoleHost::with_simulation(sim, &settings);

        let mut out = Vec::new();
        let summary = host.run(&mut out).unwrap();

        assert_eq!(summary.stop_reason, StopReason::GenerationLimit);
        assert_eq!(summary.generations, 2);
        assert_eq!(summary.final_population, 3);
        assert_eq!(host.simulation().grid(), &blinker);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Generation 0 | Population 3"));
        assert!(text.contains("Generation 2 | Population 3"));
        assert!(text.contains("·█·\n·█·\n·█·\n"));
    }

    #[test]
    fn test_run_stops_when_extinct() {
        let settings = quiet_settings();
        let lonely = Grid::from_cells(vec![vec![false, true], vec![false, false]]).unwrap();
        let sim = Simulation::with_grid(lonely, &settings);
        let mut host = ConsoleHost::with_simulation(sim, &settings);

        let summary = host.run(&mut Vec::new()).unwrap();
        assert_eq!(summary.stop_reason, StopReason::Extinct);
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.final_population, 0);
    }

    #[test]
    fn test_clear_screen_prefix() {
        let mut settings = quiet_settings();
        settings.output.clear_screen = true;
        let sim = Simulation::with_grid(Grid::new(2, 2), &settings);
        let mut host = ConsoleHost::with_simulation(sim, &settings);

        let mut out = Vec::new();
        host.run(&mut out).unwrap();
        assert!(out.starts_with(CLEAR_SCREEN.as_bytes()));
    }
}
