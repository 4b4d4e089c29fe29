//! L-shaped corridor carving between two grid points.

use crate::grid::TileGrid;
use crate::registry::TileId;

/// Carve a one-cell-wide corridor from `from` to `to`: the full horizontal
/// leg first, then the vertical leg from the reached x.
///
/// Each step moves exactly one cell toward the target and writes the tile
/// after stepping, so the source cell is left alone and the target cell is
/// always written. Out-of-bounds cells along the way are silently skipped;
/// callers are expected to keep both endpoints inside the grid.
pub fn carve_corridor(grid: &mut TileGrid, from: (i32, i32), to: (i32, i32), tile: TileId) {
    let (mut x, mut y) = from;
    while x != to.0 {
        x += if x < to.0 { 1 } else { -1 };
        grid.set_tile(x, y, tile, true);
    }
    while y != to.1 {
        y += if y < to.1 { 1 } else { -1 };
        grid.set_tile(x, y, tile, true);
    }
}
