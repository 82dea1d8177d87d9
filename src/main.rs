//! Command line front end for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    config::{CliOverrides, ResizePolicy, Settings, Speed},
    game_of_life::{create_example_patterns, load_pattern, save_pattern, GridFactory, LifeEngine},
    host::ConsoleHost,
    utils::{ColorOutput, GridFormatter},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Bounded Game of Life simulator")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Pattern file to load (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Speed multiplier (overrides config)
        #[arg(short, long, value_enum)]
        speed: Option<Speed>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Advance a pattern file a number of generations and print the result
    Step {
        /// Pattern file (.json nested arrays or 0/1 text)
        pattern: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Write the final grid here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a randomly seeded grid to a file
    Generate {
        #[arg(long)]
        rows: usize,

        #[arg(long)]
        cols: usize,

        /// Output file (.json or text)
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            config, rows, cols, pattern, generations, speed, seed,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                seed,
                speed,
                max_generations: generations,
                pattern_file: pattern,
            };
            run_command(config, overrides)
        }
        Commands::Step { pattern, generations, output } => step_command(pattern, generations, output),
        Commands::Generate { rows, cols, output, seed } => generate_command(rows, cols, output, seed),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let directive = if verbose { "life_engine=debug" } else { "life_engine=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = Settings::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut host = ConsoleHost::new(&settings);
    let stdout = std::io::stdout();
    let summary = host.run(&mut stdout.lock())?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Stopped after {} generation(s) with {} living cell(s)",
            summary.generations, summary.final_population
        ))
    );
    Ok(())
}

fn step_command(pattern_path: PathBuf, generations: usize, output: Option<PathBuf>) -> Result<()> {
    let grid = load_pattern(&pattern_path)
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    println!("Generation 0 ({}x{}):", grid.rows(), grid.cols());
    println!("{}", GridFormatter::format_grid_compact(&grid));

    let result = LifeEngine::step_generations(&grid, generations);
    println!("Generation {} (living: {}):", generations, result.living_count());
    println!("{}", GridFormatter::format_grid_compact(&result));

    if let Some(path) = output {
        save_pattern(&result, &path)?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
    }
    Ok(())
}

fn generate_command(rows: usize, cols: usize, output: PathBuf, seed: Option<u64>) -> Result<()> {
    let grid = match seed {
        Some(seed) => GridFactory::generate_with_rng(&mut ChaCha8Rng::seed_from_u64(seed), rows, cols),
        None => GridFactory::generate(rows, cols),
    };
    save_pattern(&grid, &output)?;
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Wrote {}x{} grid with {} living cell(s) to {}",
            rows,
            cols,
            grid.living_count(),
            output.display()
        ))
    );
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let mut glider = Settings::default();
    glider.simulation.rows = 20;
    glider.simulation.cols = 40;
    glider.simulation.resize_policy = ResizePolicy::Dead;
    glider.input.pattern_file = Some(PathBuf::from("patterns/glider.txt"));
    glider.to_file(config_dir.join("glider.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: life_engine run --config {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_engine",
            "run",
            "--config", "test.yaml",
            "--generations", "5",
            "--speed", "x4",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["life_engine", "step", "p.json", "-g", "3"]);
        assert!(cli.is_ok());

        let bad = Cli::try_parse_from(["life_engine", "run", "--speed", "x3"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        assert!(config.exists());
        assert!(Settings::from_file(&config).is_ok());
        assert!(temp_dir.path().join("config/glider.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_generate_and_step_commands() {
        let temp_dir = tempdir().unwrap();
        let grid_path = temp_dir.path().join("random.json");
        generate_command(6, 7, grid_path.clone(), Some(3)).unwrap();

        let grid = load_pattern(&grid_path).unwrap();
        assert_eq!(grid.dimensions(), (6, 7));

        let out = temp_dir.path().join("next.txt");
        step_command(grid_path, 2, Some(out.clone())).unwrap();
        assert_eq!(load_pattern(&out).unwrap(), LifeEngine::step_generations(&grid, 2));
    }
}
