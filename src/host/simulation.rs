//! Simulation state owned by a host: the current grid plus play/pause and speed

use crate::config::{ResizePolicy, Settings, Speed};
use crate::game_of_life::{load_pattern, Grid, GridFactory, LifeEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Holds the live grid and replaces it on every tick.
///
/// All engine calls go through here one at a time; the engine itself keeps
/// no state between calls.
pub struct Simulation {
    grid: Grid,
    generation: u64,
    running: bool,
    speed: Speed,
    frames_per_tick: u32,
    frame_counter: u64,
    base_interval: Duration,
    resize_policy: ResizePolicy,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Seed a random grid from the settings, then apply the configured pattern if any
    pub fn new(settings: &Settings) -> Self {
        let mut rng = host_rng(settings.simulation.seed);
        let grid = GridFactory::generate_with_rng(
            &mut rng,
            settings.simulation.rows,
            settings.simulation.cols,
        );

        let mut sim = Self::from_parts(grid, settings, rng);
        if let Some(ref pattern) = settings.input.pattern_file {
            sim.load_pattern(pattern);
        }
        sim
    }

    /// Start from an explicit grid instead of a random one
    pub fn with_grid(grid: Grid, settings: &Settings) -> Self {
        Self::from_parts(grid, settings, host_rng(settings.simulation.seed))
    }

    fn from_parts(grid: Grid, settings: &Settings, rng: ChaCha8Rng) -> Self {
        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            population = grid.living_count(),
            "simulation initialised"
        );
        Self {
            grid,
            generation: 0,
            running: true,
            speed: settings.timing.speed,
            frames_per_tick: settings.timing.frames_per_tick.max(1),
            frame_counter: 0,
            base_interval: settings.timing.base_interval(),
            resize_policy: settings.simulation.resize_policy,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.living_count()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Advance one generation if not paused
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.advance();
        true
    }

    /// Advance one generation even while paused
    pub fn step_once(&mut self) {
        self.advance();
    }

    /// Frame-driven cadence: advance every `frames_per_tick / speed` frames (at least every frame)
    pub fn on_frame(&mut self) -> bool {
        self.frame_counter += 1;
        if !self.running {
            return false;
        }

        let every = (self.frames_per_tick / self.speed.multiplier()).max(1);
        if self.frame_counter % u64::from(every) == 0 {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Sleep-driven cadence: the base interval divided by the speed multiplier
    pub fn tick_interval(&self) -> Duration {
        self.base_interval / self.speed.multiplier()
    }

    fn advance(&mut self) {
        self.grid = LifeEngine::step(&self.grid);
        self.generation += 1;
        debug!(
            generation = self.generation,
            population = self.grid.living_count(),
            "advanced"
        );
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn cycle_speed(&mut self) -> Speed {
        self.speed = self.speed.next();
        info!(speed = self.speed.multiplier(), "speed changed");
        self.speed
    }

    /// React to a viewport change. Negative sizes are clamped to zero.
    pub fn resize_viewport(&mut self, rows: i64, cols: i64) {
        let rows = usize::try_from(rows).unwrap_or(0);
        let cols = usize::try_from(cols).unwrap_or(0);
        if self.grid.dimensions() == (rows, cols) {
            return;
        }

        debug!(
            from_rows = self.grid.rows(),
            from_cols = self.grid.cols(),
            rows,
            cols,
            "resizing grid"
        );
        self.grid = LifeEngine::resize_with(&self.grid, rows, cols, self.resize_policy, &mut self.rng);
    }

    /// Install a pattern file, fitted to the current grid size.
    ///
    /// Failures are logged and leave the current grid untouched.
    pub fn load_pattern<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        match load_pattern(path) {
            Ok(pattern) => {
                let (rows, cols) = self.grid.dimensions();
                info!(
                    path = %path.display(),
                    pattern_rows = pattern.rows(),
                    pattern_cols = pattern.cols(),
                    "pattern loaded"
                );
                self.grid =
                    LifeEngine::resize_with(&pattern, rows, cols, self.resize_policy, &mut self.rng);
                true
            }
            Err(err) => {
                warn!(
                    "keeping current grid, pattern load failed: {:#}",
                    anyhow::Error::new(err)
                );
                false
            }
        }
    }

    /// Replace the grid with a fresh random one of the same size
    pub fn randomize(&mut self) {
        let (rows, cols) = self.grid.dimensions();
        self.grid = GridFactory::generate_with_rng(&mut self.rng, rows, cols);
        self.generation = 0;
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        let (rows, cols) = self.grid.dimensions();
        self.grid = Grid::new(rows, cols);
        self.generation = 0;
    }
}

fn host_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::save_pattern;
    use tempfile::tempdir;

    fn settings(rows: usize, cols: usize) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.rows = rows;
        settings.simulation.cols = cols;
        settings.simulation.seed = Some(1234);
        settings
    }

    fn blinker() -> Grid {
        Grid::from_cells(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap()
    }

    #[test]
    fn test_seeded_simulations_match() {
        let a = Simulation::new(&settings(10, 12));
        let b = Simulation::new(&settings(10, 12));
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.grid().dimensions(), (10, 12));
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn test_tick_respects_pause() {
        let mut sim = Simulation::with_grid(blinker(), &settings(3, 3));
        assert!(sim.tick());
        assert_eq!(sim.generation(), 1);

        sim.pause();
        assert!(!sim.tick());
        assert_eq!(sim.generation(), 1);

        sim.step_once();
        assert_eq!(sim.generation(), 2);
        assert_eq!(sim.grid(), &blinker());

        assert!(sim.toggle_pause());
        assert!(sim.is_running());
    }

    #[test]
    fn test_frame_cadence_scales_with_speed() {
        let mut s = settings(3, 3);
        s.timing.frames_per_tick = 4;
        let mut sim = Simulation::with_grid(blinker(), &s);

        let advanced = (0..8).filter(|_| sim.on_frame()).count();
        assert_eq!(advanced, 2);

        sim.set_speed(Speed::X4);
        let advanced = (0..8).filter(|_| sim.on_frame()).count();
        assert_eq!(advanced, 8);
    }

    #[test]
    fn test_tick_interval_scales_with_speed() {
        let mut s = settings(1, 1);
        s.timing.tick_interval_ms = 200;
        let mut sim = Simulation::with_grid(Grid::new(1, 1), &s);

        assert_eq!(sim.tick_interval(), Duration::from_millis(200));
        assert_eq!(sim.cycle_speed(), Speed::X2);
        assert_eq!(sim.tick_interval(), Duration::from_millis(100));
        sim.cycle_speed();
        assert_eq!(sim.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_negative_viewport_is_clamped() {
        let mut sim = Simulation::new(&settings(4, 4));
        sim.resize_viewport(-3, 5);
        assert_eq!(sim.grid().dimensions(), (0, 5));
        assert!(sim.tick());
        assert_eq!(sim.grid().dimensions(), (0, 5));
    }

    #[test]
    fn test_viewport_growth_keeps_existing_cells() {
        let mut s = settings(3, 3);
        s.simulation.resize_policy = ResizePolicy::Dead;
        let mut sim = Simulation::with_grid(blinker(), &s);

        sim.resize_viewport(6, 8);
        assert_eq!(sim.grid().dimensions(), (6, 8));
        assert_eq!(sim.grid().living_cells(), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_load_pattern_fits_current_size() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.json");
        save_pattern(&blinker(), &path).unwrap();

        let mut s = settings(5, 5);
        s.simulation.resize_policy = ResizePolicy::Dead;
        let mut sim = Simulation::new(&s);

        assert!(sim.load_pattern(&path));
        assert_eq!(sim.grid().dimensions(), (5, 5));
        assert_eq!(sim.grid().living_cells(), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_failed_load_keeps_grid() {
        let temp_dir = tempdir().unwrap();
        let bad = temp_dir.path().join("bad.json");
        std::fs::write(&bad, "[[true, false], [true]").unwrap();

        let mut sim = Simulation::new(&settings(6, 6));
        let before = sim.grid().clone();

        assert!(!sim.load_pattern(&bad));
        assert!(!sim.load_pattern(temp_dir.path().join("missing.txt")));
        assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn test_configured_pattern_applied_on_start() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        save_pattern(&blinker(), &path).unwrap();

        let mut s = settings(3, 3);
        s.input.pattern_file = Some(path);
        let sim = Simulation::new(&s);
        assert_eq!(sim.grid(), &blinker());
    }

    #[test]
    fn test_clear_and_randomize() {
        let mut sim = Simulation::new(&settings(20, 20));
        sim.tick();
        sim.clear();
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.generation(), 0);

        sim.randomize();
        assert_eq!(sim.grid().dimensions(), (20, 20));
        assert!(sim.population() > 0);
    }
}
