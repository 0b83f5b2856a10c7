#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded random placement of food and obstacles on free grid cells.

use std::collections::HashSet;

use grid_snake_core::{Cell, GridSize};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

/// Rejection-sampling attempts allowed per grid cell before giving up.
const ATTEMPTS_PER_CELL: usize = 64;

/// Reasons a placement request cannot produce a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Every cell of the grid is excluded.
    #[error("no free cell remains on a {}x{} grid", .grid.width(), .grid.height())]
    NoFreeCell {
        /// Grid the placement was attempted on.
        grid: GridSize,
    },
    /// Rejection sampling exhausted its retry budget.
    #[error("no free cell sampled after {attempts} attempts")]
    RetryLimitExceeded {
        /// Number of samples drawn before giving up.
        attempts: usize,
    },
}

/// Random placer owning the seeded generator used for every board item.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: ChaCha8Rng,
}

impl RandomPlacer {
    /// Creates a placer whose sequence of placements is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Samples a uniformly distributed cell that is not part of `occupied`.
    pub fn place(
        &mut self,
        occupied: &HashSet<Cell>,
        grid: GridSize,
    ) -> Result<Cell, PlacementError> {
        place_with(&mut self.rng, occupied, grid)
    }
}

/// Samples a uniformly distributed free cell using the provided generator.
///
/// Cells are drawn uniformly from the whole grid and rejected while they are
/// part of `occupied`. A fully covered grid is detected up front so the call
/// never spins; otherwise sampling stops after a bounded number of attempts.
pub fn place_with<R>(
    rng: &mut R,
    occupied: &HashSet<Cell>,
    grid: GridSize,
) -> Result<Cell, PlacementError>
where
    R: Rng + ?Sized,
{
    let cell_count = grid.cell_count();
    let blocked = occupied.iter().filter(|cell| grid.contains(**cell)).count();
    if blocked >= cell_count {
        return Err(PlacementError::NoFreeCell { grid });
    }

    let attempts = cell_count.saturating_mul(ATTEMPTS_PER_CELL);
    for attempt in 0..attempts {
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            continue;
        };

        let candidate = Cell::new(x, y);
        if !occupied.contains(&candidate) {
            debug!(x, y, attempt, "placed cell");
            return Ok(candidate);
        }
    }

    Err(PlacementError::RetryLimitExceeded { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fully_covered_grid_without_sampling() {
        let grid = GridSize::new(2, 2);
        let occupied: HashSet<Cell> = grid.cells().collect();
        let mut placer = RandomPlacer::new(7);

        assert_eq!(
            placer.place(&occupied, grid),
            Err(PlacementError::NoFreeCell { grid })
        );
    }

    #[test]
    fn off_grid_exclusions_do_not_count_against_capacity() {
        let grid = GridSize::new(1, 2);
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(5, 5), Cell::new(-1, 0)]
            .into_iter()
            .collect();
        let mut placer = RandomPlacer::new(11);

        assert_eq!(placer.place(&occupied, grid), Ok(Cell::new(0, 1)));
    }

    #[test]
    fn errors_render_readable_messages() {
        let error = PlacementError::NoFreeCell {
            grid: GridSize::new(3, 4),
        };
        assert_eq!(error.to_string(), "no free cell remains on a 3x4 grid");
    }
}
