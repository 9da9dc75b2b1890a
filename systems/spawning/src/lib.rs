#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for placing new tiles on the board.
//!
//! All randomness is drawn from the generator handed to [`Spawner::place`];
//! the system keeps no random state of its own.

use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use tilemerge_core::{CellCoord, ConfigIssue, EngineError, Grid, Tile, ValueDistribution};

/// Tile placed by a successful spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    /// Cell that received the tile.
    pub cell: CellCoord,
    /// Tile that was placed.
    pub tile: Tile,
}

/// Result of a spawn attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Grid after the attempt; identical to the input when nothing was placed.
    pub grid: Grid,
    /// Placed tile, or `None` when the grid had no empty cell.
    pub placed: Option<SpawnedTile>,
}

impl SpawnOutcome {
    /// Reports whether a tile was placed.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placed.is_some()
    }
}

/// Weighted tile sampler prepared from a validated [`ValueDistribution`].
#[derive(Clone, Debug)]
pub struct Spawner {
    tiles: Vec<Tile>,
    weights: WeightedIndex<u64>,
}

impl Spawner {
    /// Prepares a sampler for the provided distribution.
    pub fn new(distribution: &ValueDistribution) -> Result<Self, EngineError> {
        let resolved = distribution.resolve()?;
        let weights = WeightedIndex::new(resolved.iter().map(|(_, weight)| u64::from(*weight)))
            .map_err(|_| ConfigIssue::ZeroTotalWeight)?;
        Ok(Self {
            tiles: resolved.into_iter().map(|(tile, _)| tile).collect(),
            weights,
        })
    }

    /// Draws a tile value from the distribution.
    pub fn sample_tile<R>(&self, rng: &mut R) -> Tile
    where
        R: Rng + ?Sized,
    {
        self.tiles[self.weights.sample(rng)]
    }

    /// Places one sampled tile on a uniformly chosen empty cell.
    ///
    /// A full grid is returned unchanged and no randomness is consumed.
    pub fn place<R>(&self, grid: &Grid, rng: &mut R) -> Result<SpawnOutcome, EngineError>
    where
        R: Rng + ?Sized,
    {
        let empty = grid.empty_cells();
        if empty.is_empty() {
            return Ok(SpawnOutcome {
                grid: grid.clone(),
                placed: None,
            });
        }

        let tile = self.sample_tile(rng);
        let cell = empty[rng.gen_range(0..empty.len())];
        let mut next = grid.clone();
        next.set(cell, Some(tile))?;

        Ok(SpawnOutcome {
            grid: next,
            placed: Some(SpawnedTile { cell, tile }),
        })
    }
}
