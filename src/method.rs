//! Generation method contract: shared context, cancellation and pacing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::grid::TileGrid;
use crate::random::RandomService;
use crate::rect::Rect;
use crate::registry::{TileId, TileRegistry, GRASS_TILE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation was cancelled")]
    Cancelled,
    #[error("no tile template named '{0}' is registered")]
    UnknownTemplate(String),
}

/// Cooperative cancellation flag shared between the host and a running
/// generation. Cloning yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Hook invoked between generation phases to pace visual feedback.
///
/// Pacing is cosmetic: it carries no data and must not affect the result.
pub trait StepPacer {
    fn step(&self);
}

/// Pacer that does nothing; the default, and what tests should use.
pub struct NoPacer;

impl StepPacer for NoPacer {
    fn step(&self) {}
}

/// Pacer that sleeps a fixed delay so generation can be watched.
pub struct DelayPacer {
    pub delay: Duration,
}

impl StepPacer for DelayPacer {
    fn step(&self) {
        thread::sleep(self.delay);
    }
}

static NO_PACER: NoPacer = NoPacer;

/// Everything a generation method acts on: the grid, the seeded random
/// service, the tile registry, and the run's cancellation/pacing hooks.
pub struct GenerationContext<'a> {
    pub grid: &'a mut TileGrid,
    pub random: &'a mut RandomService,
    pub registry: &'a TileRegistry,
    pub cancel: CancelToken,
    pub pacer: &'a dyn StepPacer,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        grid: &'a mut TileGrid,
        random: &'a mut RandomService,
        registry: &'a TileRegistry,
    ) -> Self {
        Self {
            grid,
            random,
            registry,
            cancel: CancelToken::new(),
            pacer: &NO_PACER,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_pacer(mut self, pacer: &'a dyn StepPacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Bail out if the host has cancelled the run. Tiles already written
    /// stay in place; there is no rollback.
    pub fn checkpoint(&self) -> Result<(), GenerationError> {
        if self.cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        Ok(())
    }

    /// Give the pacer a chance to delay between phases.
    pub fn pace(&self) {
        self.pacer.step();
    }

    /// Resolve a tile name that the run cannot proceed without.
    pub fn require_tile(&self, name: &str) -> Result<TileId, GenerationError> {
        self.registry
            .find(name)
            .ok_or_else(|| GenerationError::UnknownTemplate(name.to_string()))
    }

    /// Fill every in-bounds cell of `room` with `tile`, overwriting.
    pub fn place_room(&mut self, room: &Rect, tile: TileId) {
        for x in room.x..room.x_max() {
            for y in room.y..room.y_max() {
                self.grid.set_tile(x, y, tile, true);
            }
        }
    }

    /// Lay the grass base layer under everything already placed. The write
    /// is non-destructive so room and corridor tiles are preserved.
    pub fn build_ground(&mut self) -> Result<(), GenerationError> {
        let ground = self.require_tile(GRASS_TILE)?;
        for x in 0..self.grid.width {
            for y in 0..self.grid.length {
                self.grid.set_tile(x, y, ground, false);
            }
        }
        Ok(())
    }
}

/// A tile-grid generation strategy.
///
/// Implementations read grid extents from the context, run their algorithm,
/// and write tiles; on cancellation they return early leaving partial state.
pub trait GenerationMethod {
    fn name(&self) -> &'static str;

    fn generate(&self, ctx: &mut GenerationContext) -> Result<(), GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ROOM_TILE;

    fn fixtures() -> (TileGrid, RandomService, TileRegistry) {
        (
            TileGrid::new(8, 8),
            RandomService::new(1),
            TileRegistry::standard(),
        )
    }

    #[test]
    fn test_checkpoint_on_cancelled_token() {
        let (mut grid, mut random, registry) = fixtures();
        let cancel = CancelToken::new();
        cancel.cancel();
        let ctx = GenerationContext::new(&mut grid, &mut random, &registry)
            .with_cancel(cancel.clone());
        assert_eq!(ctx.checkpoint(), Err(GenerationError::Cancelled));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_ground_fill_is_non_destructive() {
        let (mut grid, mut random, registry) = fixtures();
        let room = registry.find(ROOM_TILE).unwrap();
        let grass = registry.find(GRASS_TILE).unwrap();
        let mut ctx = GenerationContext::new(&mut grid, &mut random, &registry);
        ctx.place_room(&Rect::new(2, 2, 3, 3), room);
        ctx.build_ground().unwrap();

        assert_eq!(grid.tile(3, 3), Some(room));
        assert_eq!(grid.tile(0, 0), Some(grass));
        assert_eq!(grid.occupied(), 64);
        assert_eq!(grid.count(room), 9);
    }

    #[test]
    fn test_missing_ground_template_is_fatal() {
        let mut grid = TileGrid::new(4, 4);
        let mut random = RandomService::new(1);
        let registry = TileRegistry::new();
        let mut ctx = GenerationContext::new(&mut grid, &mut random, &registry);
        assert_eq!(
            ctx.build_ground(),
            Err(GenerationError::UnknownTemplate(GRASS_TILE.to_string()))
        );
    }

    #[test]
    fn test_place_room_clips_to_grid() {
        let (mut grid, mut random, registry) = fixtures();
        let room = registry.find(ROOM_TILE).unwrap();
        let mut ctx = GenerationContext::new(&mut grid, &mut random, &registry);
        ctx.place_room(&Rect::new(6, 6, 4, 4), room);
        // Only the 2x2 in-bounds corner is written.
        assert_eq!(grid.count(room), 4);
    }
}
