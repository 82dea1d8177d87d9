//! Grid representation and utilities for Game of Life

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when building or editing a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} has length {len}, expected {expected}")]
    Jagged { row: usize, len: usize, expected: usize },

    #[error("coordinates ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// A generation of cell states, stored row-major.
///
/// Dimensions are fixed for the lifetime of a value; `LifeEngine::resize`
/// produces a new grid instead of changing this one. On the wire a grid is
/// a list of rows, each row a list of booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid from a 2D boolean array.
    ///
    /// An empty outer vector gives a 0x0 grid; rows of differing length are rejected.
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);

        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Jagged {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Build a grid by evaluating `f(row, col)` for every cell in row-major order
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Both dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major view of the cell states
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            false // Out of bounds cells are considered dead
        }
    }

    /// Return a copy of this grid with one cell changed
    pub fn with_cell(&self, row: usize, col: usize, value: bool) -> Result<Self, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut next = self.clone();
        let idx = next.index(row, col);
        next.cells[idx] = value;
        Ok(next)
    }

    /// Count living neighbors in the 3x3 window clamped to the grid edges.
    /// The cell itself is not counted.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }

        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.rows - 1);
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.cols - 1);

        let mut count = 0;
        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                if (r, c) != (row, col) && self.cells[self.index(r, c)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        let mut living = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.get(row, col) {
                    living.push((row, col));
                }
            }
        }
        living
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_dead(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// True for a grid with zero rows or zero columns
    pub fn is_degenerate(&self) -> bool {
        self.cells.is_empty()
    }

    /// Copy the grid out as one `Vec<bool>` per row
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[bool]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = GridError;

    fn try_from(cells: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if self.get(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
