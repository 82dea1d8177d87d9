//! Random initial grids

use super::Grid;
use rand::Rng;

/// Probability that a freshly seeded cell starts alive
pub const ALIVE_PROBABILITY: f64 = 0.25;

/// Produces randomly seeded grids
pub struct GridFactory;

impl GridFactory {
    /// Generate a grid where every cell is independently alive with probability 1/4
    pub fn generate(rows: usize, cols: usize) -> Grid {
        Self::generate_with_rng(&mut rand::thread_rng(), rows, cols)
    }

    /// Same as [`GridFactory::generate`] but draws from the given source
    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Grid {
        Grid::from_fn(rows, cols, |_, _| seed_cell(rng))
    }
}

/// One Bernoulli(1/4) draw
pub(crate) fn seed_cell<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(ALIVE_PROBABILITY)
}
