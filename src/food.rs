use std::collections::HashSet;

use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::PlacementError;
use crate::grid::{Cell, Grid};

/// Random draws tried before falling back to picking from the free cells directly.
const MAX_SAMPLING_ATTEMPTS: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn spawn<'a, R, I>(grid: &Grid, occupied: I, rng: &mut R) -> Result<Self, PlacementError>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell>,
    {
        let position = free_cell(grid, occupied, rng)?;
        Ok(Food { position })
    }

    pub fn respawn<'a, R, I>(&mut self, grid: &Grid, occupied: I, rng: &mut R) -> Result<(), PlacementError>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell>,
    {
        self.position = free_cell(grid, occupied, rng)?;
        debug!("food respawned at {}", self.position);
        Ok(())
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn at(position: Cell) -> Self {
        Food { position }
    }
}

/// Uniformly picks a cell not in `occupied`.
///
/// Rejection sampling is cheap while the grid is mostly empty; once it keeps
/// missing, the remaining free cells are enumerated and one is chosen from
/// those, so placement always terminates.
fn free_cell<'a, R, I>(grid: &Grid, occupied: I, rng: &mut R) -> Result<Cell, PlacementError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Cell>,
{
    let taken: HashSet<Cell> = occupied.into_iter().copied().filter(|c| grid.in_bounds(*c)).collect();

    if taken.len() >= grid.cell_count() {
        return Err(PlacementError::NoFreeCell { cells: grid.cell_count() });
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = Cell::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }

    grid.cells()
        .filter(|c| !taken.contains(c))
        .choose(rng)
        .ok_or(PlacementError::NoFreeCell { cells: grid.cell_count() })
}
