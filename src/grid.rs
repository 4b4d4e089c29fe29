//! The 2D cell grid that generation methods write tiles into.

use crate::registry::TileId;

/// A rectangular grid of cells, each holding at most one tile.
///
/// `width` runs along x, `length` along y. The grid does not wrap; all
/// access is bounds-checked and out-of-bounds writes are silently dropped.
#[derive(Clone)]
pub struct TileGrid {
    pub width: i32,
    pub length: i32,
    cells: Vec<Option<TileId>>,
}

impl TileGrid {
    pub fn new(width: i32, length: i32) -> Self {
        assert!(width > 0 && length > 0, "grid extents must be positive");
        Self {
            width,
            length,
            cells: vec![None; (width as usize) * (length as usize)],
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.length
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The tile assigned to (x, y), or `None` for an empty or
    /// out-of-bounds cell.
    pub fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    /// Assign a tile to (x, y). With `overwrite = false` an occupied cell is
    /// left alone. Returns whether the cell was written.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileId, overwrite: bool) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if self.cells[idx].is_some() && !overwrite {
            return false;
        }
        self.cells[idx] = Some(tile);
        true
    }

    /// All cell coordinates in grid order (x-major, matching the write
    /// order of the full-grid passes).
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32)> {
        let (width, length) = (self.width, self.length);
        (0..width).flat_map(move |x| (0..length).map(move |y| (x, y)))
    }

    /// Number of cells currently holding `tile`.
    pub fn count(&self, tile: TileId) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(tile)).count()
    }

    /// Number of cells holding any tile.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TileRegistry;

    #[test]
    fn test_bounds() {
        let grid = TileGrid::new(4, 3);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(3, 2));
        assert!(!grid.in_bounds(4, 0));
        assert!(!grid.in_bounds(0, 3));
        assert!(!grid.in_bounds(-1, 1));
        assert_eq!(grid.tile(-1, 1), None);
    }

    #[test]
    fn test_overwrite_semantics() {
        let mut registry = TileRegistry::new();
        let a = registry.register("A", 'a');
        let b = registry.register("B", 'b');
        let mut grid = TileGrid::new(4, 4);

        assert!(grid.set_tile(1, 1, a, false));
        // Non-destructive write must not replace an occupied cell.
        assert!(!grid.set_tile(1, 1, b, false));
        assert_eq!(grid.tile(1, 1), Some(a));
        // Destructive write replaces it.
        assert!(grid.set_tile(1, 1, b, true));
        assert_eq!(grid.tile(1, 1), Some(b));
    }

    #[test]
    fn test_out_of_bounds_write_is_dropped() {
        let mut registry = TileRegistry::new();
        let a = registry.register("A", 'a');
        let mut grid = TileGrid::new(4, 4);
        assert!(!grid.set_tile(9, 9, a, true));
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_coords_covers_grid() {
        let grid = TileGrid::new(3, 2);
        let all: Vec<_> = grid.coords().collect();
        assert_eq!(all.len(), 6);
        assert!(all.contains(&(0, 0)));
        assert!(all.contains(&(2, 1)));
    }
}
