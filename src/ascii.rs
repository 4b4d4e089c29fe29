//! ASCII rendering of generated grids.
//!
//! One glyph per cell, one text row per grid row. Used by the CLI and handy
//! for eyeballing layouts in tests.

use crate::grid::TileGrid;
use crate::registry::TileRegistry;

/// Glyph for cells no method wrote to.
const EMPTY_GLYPH: char = ' ';

/// Render the grid as text, row y = 0 at the top.
pub fn render_grid(grid: &TileGrid, registry: &TileRegistry) -> String {
    let mut out = String::with_capacity(((grid.width + 1) * grid.length) as usize);
    for y in 0..grid.length {
        for x in 0..grid.width {
            match grid.tile(x, y) {
                Some(id) => out.push(registry.glyph(id)),
                None => out.push(EMPTY_GLYPH),
            }
        }
        out.push('\n');
    }
    out
}

/// One "glyph  name" line per registered template.
pub fn render_legend(registry: &TileRegistry) -> String {
    let mut out = String::new();
    for template in registry.templates() {
        out.push(template.glyph);
        out.push_str("  ");
        out.push_str(&template.name);
        out.push('\n');
    }
    out
}
