//! Game of Life rules: next-generation computation and resizing

use super::factory::seed_cell;
use super::Grid;
use crate::config::ResizePolicy;
use rand::Rng;
use rayon::prelude::*;

/// Neighbor counts that keep a live cell alive
const SURVIVAL_COUNTS: [u8; 2] = [2, 3];

/// Neighbor count that brings a dead cell to life
const BIRTH_COUNT: u8 = 3;

/// Game of Life rules engine
pub struct LifeEngine;

impl LifeEngine {
    /// Compute the next generation (B3/S23, closed boundary).
    ///
    /// Every cell reads only `current`; results go to a fresh buffer, so the
    /// input is never observed half-updated.
    pub fn step(current: &Grid) -> Grid {
        let (rows, cols) = current.dimensions();

        let next_cells: Vec<bool> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..cols).map(move |col| {
                    Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
                })
            })
            .collect();

        Grid::from_raw(rows, cols, next_cells)
    }

    /// Step the grid forward several generations
    pub fn step_generations(grid: &Grid, generations: usize) -> Grid {
        let mut grid = grid.clone();
        for _ in 0..generations {
            grid = Self::step(&grid);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            SURVIVAL_COUNTS.contains(&neighbor_count)
        } else {
            neighbor_count == BIRTH_COUNT
        }
    }

    /// Resize with the default policy, reseeding newly exposed cells
    pub fn resize(grid: &Grid, rows: usize, cols: usize) -> Grid {
        Self::resize_with(grid, rows, cols, ResizePolicy::default(), &mut rand::thread_rng())
    }

    /// Produce a `rows x cols` grid from `grid`.
    ///
    /// Cells inside the old bounds are copied. Cells outside them are set
    /// according to `policy`. The random source is only drawn from for
    /// cells that did not exist before.
    pub fn resize_with<R: Rng + ?Sized>(
        grid: &Grid,
        rows: usize,
        cols: usize,
        policy: ResizePolicy,
        rng: &mut R,
    ) -> Grid {
        let (old_rows, old_cols) = grid.dimensions();

        Grid::from_fn(rows, cols, |row, col| {
            if row < old_rows && col < old_cols {
                grid.get(row, col)
            } else {
                match policy {
                    ResizePolicy::Reseed => seed_cell(rng),
                    ResizePolicy::Dead => false,
                }
            }
        })
    }
}
