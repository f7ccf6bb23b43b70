#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded food placement.
//!
//! Food is drawn uniformly over the whole grid and re-drawn while it lands on
//! the snake. Rejection sampling is capped; once the cap is hit the placer
//! scans for the remaining free cells and picks one of those instead, so a
//! crowded board never stalls the tick and a full board is reported as
//! [`FoodPlacementError::BoardFull`].

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{Cell, GridSize};
use thiserror::Error;
use tracing::debug;

/// Number of uniform draws attempted before falling back to a free-cell scan.
pub const MAX_REJECTION_SAMPLES: usize = 100;

/// Reasons food could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FoodPlacementError {
    /// Every cell of the grid is occupied by the snake.
    #[error("no free cell left on a {width}x{height} grid")]
    BoardFull {
        /// Grid columns.
        width: u32,
        /// Grid rows.
        height: u32,
    },
}

/// Deterministic food placer driven by a seeded ChaCha generator.
#[derive(Clone, Debug)]
pub struct FoodPlacer {
    rng: ChaCha8Rng,
    seed: u64,
}

impl FoodPlacer {
    /// Creates a placer whose sequence of placements is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the placer was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Picks a cell that is inside `grid` and not occupied by `snake`.
    pub fn place<'a, I>(&mut self, snake: I, grid: GridSize) -> Result<Cell, FoodPlacementError>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let board_full = FoodPlacementError::BoardFull {
            width: grid.width(),
            height: grid.height(),
        };
        if grid.cell_count() == 0 {
            return Err(board_full);
        }

        let occupied: HashSet<Cell> = snake.into_iter().copied().collect();

        for attempt in 0..MAX_REJECTION_SAMPLES {
            let candidate = self.sample(grid);
            if !occupied.contains(&candidate) {
                debug!(?candidate, attempt, "food placed by sampling");
                return Ok(candidate);
            }
        }

        let free: Vec<Cell> = grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();
        if free.is_empty() {
            return Err(board_full);
        }

        let choice = free[self.rng.gen_range(0..free.len())];
        debug!(?choice, free = free.len(), "food placed from free-cell scan");
        Ok(choice)
    }

    fn sample(&mut self, grid: GridSize) -> Cell {
        let x = self.rng.gen_range(0..grid.width());
        let y = self.rng.gen_range(0..grid.height());
        Cell::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
        )
    }
}
