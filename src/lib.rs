//! Tile-grid dungeon and terrain generation.
//!
//! Four interchangeable generation methods (scattered rooms, binary space
//! partitioning, cellular automata, noise biomes) write named tiles into a
//! shared cell grid. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod automata;
pub mod bsp;
pub mod corridor;
pub mod grid;
pub mod method;
pub mod noise_biomes;
pub mod random;
pub mod rect;
pub mod registry;
pub mod scatter;
