//! Cellular-automaton terrain smoothing.
//!
//! Seeds every cell as grass or water by independent Bernoulli trials, then
//! runs synchronous majority-rule iterations: a cell becomes grass when at
//! least four of its eight neighbors are grass. The grid edge does not wrap;
//! out-of-bounds neighbors simply don't count.

use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;
use crate::method::{GenerationContext, GenerationError, GenerationMethod};
use crate::registry::{TileId, GRASS_TILE, WATER_TILE};

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighbor count at which a cell turns (or stays) grass.
const GRASS_THRESHOLD: usize = 4;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellularAutomata {
    /// Initial grass probability, in percent.
    pub density: f64,
    pub iterations: u32,
}

impl Default for CellularAutomata {
    fn default() -> Self {
        Self {
            density: 80.0,
            iterations: 0,
        }
    }
}

impl GenerationMethod for CellularAutomata {
    fn name(&self) -> &'static str {
        "automata"
    }

    fn generate(&self, ctx: &mut GenerationContext) -> Result<(), GenerationError> {
        let grass = ctx.require_tile(GRASS_TILE)?;
        let water = ctx.require_tile(WATER_TILE)?;

        ctx.checkpoint()?;
        for (x, y) in ctx.grid.coords() {
            let tile = if ctx.random.chance(self.density / 100.0) {
                grass
            } else {
                water
            };
            ctx.grid.set_tile(x, y, tile, true);
        }
        ctx.pace();

        for iteration in 0..self.iterations {
            ctx.checkpoint()?;
            step(ctx.grid, grass, water);
            log::trace!("automata iteration {} done", iteration + 1);
            ctx.pace();
        }
        Ok(())
    }
}

/// Advance the whole grid by one synchronous iteration: next states are
/// computed from a snapshot of the current grid before any cell is written.
fn step(grid: &mut TileGrid, grass: TileId, water: TileId) {
    let next: Vec<TileId> = grid
        .coords()
        .map(|(x, y)| {
            if count_grass_neighbors(grid, x, y, grass) >= GRASS_THRESHOLD {
                grass
            } else {
                water
            }
        })
        .collect();
    for ((x, y), tile) in grid.coords().zip(next) {
        grid.set_tile(x, y, tile, true);
    }
}

fn count_grass_neighbors(grid: &TileGrid, x: i32, y: i32, grass: TileId) -> usize {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| grid.tile(x + dx, y + dy) == Some(grass))
        .count()
}
