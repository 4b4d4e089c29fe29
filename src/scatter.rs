//! Scattered room placement with corridor chaining.
//!
//! Rejection-samples rectangular rooms into the grid, keeping a one-cell
//! margin between them, then links the accepted room centers with corridors
//! in placement order and lays a grass base layer underneath.

use serde::{Deserialize, Serialize};

use crate::corridor::carve_corridor;
use crate::method::{GenerationContext, GenerationError, GenerationMethod};
use crate::rect::Rect;
use crate::registry::{CORRIDOR_TILE, ROOM_TILE};

/// Margin kept between any two accepted rooms, in cells.
const ROOM_MARGIN: i32 = 1;

/// Attempts allowed per requested room before placement gives up.
const ATTEMPTS_PER_ROOM: i32 = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomScatter {
    pub max_rooms: i32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Default for RoomScatter {
    fn default() -> Self {
        Self {
            max_rooms: 10,
            min_width: 5,
            max_width: 5,
            min_height: 5,
            max_height: 5,
        }
    }
}

impl GenerationMethod for RoomScatter {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn generate(&self, ctx: &mut GenerationContext) -> Result<(), GenerationError> {
        let room_tile = ctx.require_tile(ROOM_TILE)?;
        let corridor_tile = ctx.require_tile(CORRIDOR_TILE)?;

        let mut rooms: Vec<Rect> = Vec::new();
        let mut centers: Vec<(i32, i32)> = Vec::new();
        let max_attempts = self.max_rooms * ATTEMPTS_PER_ROOM;
        let mut attempts = 0;

        while (rooms.len() as i32) < self.max_rooms && attempts < max_attempts {
            ctx.checkpoint()?;

            let width = ctx.random.range(self.min_width, self.max_width + 1);
            let height = ctx.random.range(self.min_height, self.max_height + 1);
            let x = ctx.random.range(0, ctx.grid.width - width);
            let y = ctx.random.range(0, ctx.grid.length - height);
            let candidate = Rect::new(x, y, width, height);

            let blocked = rooms
                .iter()
                .any(|placed| candidate.intersects_with_margin(placed, ROOM_MARGIN));
            if !blocked {
                ctx.place_room(&candidate, room_tile);
                centers.push(candidate.center());
                rooms.push(candidate);
            }
            attempts += 1;
            ctx.pace();
        }

        // Falling short of the quota is expected on crowded grids.
        log::debug!(
            "scatter placed {} of {} rooms in {} attempts",
            rooms.len(),
            self.max_rooms,
            attempts
        );

        for pair in centers.windows(2) {
            carve_corridor(ctx.grid, pair[0], pair[1], corridor_tile);
        }

        ctx.build_ground()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileGrid;
    use crate::method::CancelToken;
    use crate::random::RandomService;
    use crate::registry::TileRegistry;

    fn run(
        method: &RoomScatter,
        width: i32,
        length: i32,
        seed: u64,
    ) -> (TileGrid, TileRegistry) {
        let mut grid = TileGrid::new(width, length);
        let mut random = RandomService::new(seed);
        let registry = TileRegistry::standard();
        {
            let mut ctx = GenerationContext::new(&mut grid, &mut random, &registry);
            method.generate(&mut ctx).unwrap();
        }
        (grid, registry)
    }

    #[test]
    fn test_single_fixed_room_on_small_grid() {
        let method = RoomScatter {
            max_rooms: 1,
            ..RoomScatter::default()
        };
        let (grid, registry) = run(&method, 10, 10, 3);

        let room = registry.find(ROOM_TILE).unwrap();
        let corridor = registry.find(CORRIDOR_TILE).unwrap();
        // Exactly one 5x5 room, no corridor (fewer than two centers), and
        // ground fill over the rest.
        assert_eq!(grid.count(room), 25);
        assert_eq!(grid.count(corridor), 0);
        assert_eq!(grid.occupied(), 100);
    }

    #[test]
    fn test_rooms_respect_margin() {
        let method = RoomScatter {
            max_rooms: 12,
            min_width: 3,
            max_width: 6,
            min_height: 3,
            max_height: 6,
        };
        for seed in 0..10 {
            let mut random = RandomService::new(seed);

            // Mirror the placement loop to recover the accepted rectangles.
            let (grid_width, grid_length) = (40, 40);
            let mut rooms: Vec<Rect> = Vec::new();
            let mut attempts = 0;
            while (rooms.len() as i32) < method.max_rooms
                && attempts < method.max_rooms * ATTEMPTS_PER_ROOM
            {
                let width = random.range(method.min_width, method.max_width + 1);
                let height = random.range(method.min_height, method.max_height + 1);
                let x = random.range(0, grid_width - width);
                let y = random.range(0, grid_length - height);
                let candidate = Rect::new(x, y, width, height);
                if rooms
                    .iter()
                    .all(|placed| !candidate.intersects_with_margin(placed, ROOM_MARGIN))
                {
                    rooms.push(candidate);
                }
                attempts += 1;
            }

            for (i, a) in rooms.iter().enumerate() {
                for b in rooms.iter().skip(i + 1) {
                    assert!(!a.intersects(b), "rooms overlap (seed {seed})");
                    assert!(
                        !a.intersects_with_margin(b, ROOM_MARGIN),
                        "rooms violate margin (seed {seed})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_crowded_grid_degrades_to_fewer_rooms() {
        // 100 rooms of 5x5 cannot fit a 12x12 grid; placement must stop at
        // the attempt budget without error.
        let method = RoomScatter {
            max_rooms: 100,
            ..RoomScatter::default()
        };
        let (grid, registry) = run(&method, 12, 12, 9);
        let room = registry.find(ROOM_TILE).unwrap();
        let placed = grid.count(room) / 25;
        assert!(placed >= 1);
        assert!(placed < 100);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let method = RoomScatter {
            max_rooms: 8,
            min_width: 3,
            max_width: 7,
            min_height: 3,
            max_height: 7,
        };
        let (a, registry) = run(&method, 30, 30, 77);
        let (b, _) = run(&method, 30, 30, 77);
        let room = registry.find(ROOM_TILE).unwrap();
        for (x, y) in a.coords() {
            assert_eq!(a.tile(x, y), b.tile(x, y));
        }
        assert!(a.count(room) > 0);
    }

    #[test]
    fn test_cancelled_run_leaves_grid_untouched() {
        let method = RoomScatter::default();
        let mut grid = TileGrid::new(20, 20);
        let mut random = RandomService::new(1);
        let registry = TileRegistry::standard();
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut ctx =
            GenerationContext::new(&mut grid, &mut random, &registry).with_cancel(cancel);
        assert_eq!(method.generate(&mut ctx), Err(GenerationError::Cancelled));
        assert_eq!(grid.occupied(), 0);
    }
}
