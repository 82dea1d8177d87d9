//! Display and output formatting utilities

use crate::config::OutputStyle;
use crate::game_of_life::Grid;

/// Format grids for the console
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in the configured style
    pub fn format_grid(grid: &Grid, style: OutputStyle) -> String {
        match style {
            OutputStyle::Compact => Self::format_grid_compact(grid),
            OutputStyle::Coords => Self::format_grid_with_coords(grid),
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1) * 3);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                output.push(if grid.get(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols() {
                output.push_str(if grid.get(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line status shown above the grid
    pub fn format_status(generation: u64, population: usize, speed_multiplier: u32, running: bool) -> String {
        format!(
            "Generation {} | Population {} | Speed {}x{}",
            generation,
            population,
            speed_multiplier,
            if running { "" } else { " | Paused" }
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
