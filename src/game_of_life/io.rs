//! Pattern files: loading and saving grid snapshots
//!
//! Two formats are understood. `.json` files hold nested boolean arrays, one
//! inner array per row. Anything else is read as text, one line per row with
//! `1`/`O` for alive and `0`/`.` for dead cells.

use super::{Grid, GridError};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a pattern could not be turned into a grid
#[derive(Debug, Error)]
pub enum PatternLoadFailure {
    #[error("failed to read pattern file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON pattern")]
    Json(#[from] serde_json::Error),

    #[error("invalid character '{ch}' at ({row}, {col}); expected one of 0 1 . O")]
    InvalidCharacter { ch: char, row: usize, col: usize },

    #[error("pattern is not rectangular")]
    Shape(#[from] GridError),
}

/// On-disk representation of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFormat {
    Json,
    Text,
}

impl PatternFormat {
    /// Pick the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PatternFormat::Json,
            _ => PatternFormat::Text,
        }
    }
}

/// Load a pattern file, choosing the format by extension
pub fn load_pattern<P: AsRef<Path>>(path: P) -> Result<Grid, PatternLoadFailure> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| PatternLoadFailure::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match PatternFormat::from_path(path) {
        PatternFormat::Json => parse_json_pattern(&content),
        PatternFormat::Text => parse_text_pattern(&content),
    }
}

/// Parse nested boolean arrays, e.g. `[[true,false],[false,true]]`
pub fn parse_json_pattern(content: &str) -> Result<Grid, PatternLoadFailure> {
    let cells: Vec<Vec<bool>> = serde_json::from_str(content)?;
    Ok(Grid::from_cells(cells)?)
}

/// Parse the line-per-row text format. Blank lines are skipped.
pub fn parse_text_pattern(content: &str) -> Result<Grid, PatternLoadFailure> {
    let mut cells = Vec::new();

    for (row_idx, line) in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
    {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '1' | 'O' => Ok(true),
                '0' | '.' => Ok(false),
                _ => Err(PatternLoadFailure::InvalidCharacter {
                    ch,
                    row: row_idx,
                    col: col_idx,
                }),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        cells.push(row);
    }

    Ok(Grid::from_cells(cells)?)
}

/// Save a grid, choosing the format by extension
pub fn save_pattern<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = match PatternFormat::from_path(path) {
        PatternFormat::Json => serde_json::to_string(grid).context("Failed to serialize grid")?,
        PatternFormat::Text => grid_to_string(grid),
    };

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.display()))?;

    Ok(())
}

/// Convert a grid to the text format
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            result.push(if grid.get(row, col) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Write the bundled example patterns into a directory
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "110000\n110000\n001100\n001100\n"),
        (
            "blinker.json",
            "[[false,false,false],[true,true,true],[false,false,false]]\n",
        ),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
