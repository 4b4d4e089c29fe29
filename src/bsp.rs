//! Binary space partitioning into connected rooms.
//!
//! Recursively splits the grid rectangle into a tree of regions, carves one
//! room per leaf, then connects sibling subtrees with corridors. Splitting
//! is bounded by a shared split budget and a maximum depth; branches that
//! cannot fit two rooms stay leaves.

use serde::{Deserialize, Serialize};

use crate::corridor::carve_corridor;
use crate::grid::TileGrid;
use crate::method::{GenerationContext, GenerationError, GenerationMethod};
use crate::random::RandomService;
use crate::rect::Rect;
use crate::registry::{TileId, CORRIDOR_TILE, ROCK_TILE, ROOM_TILE};

/// Aspect ratio at which the split axis is forced instead of coin-flipped.
const SPLIT_RATIO: f32 = 1.25;

/// One region of the partition tree. Children exactly tile the bounds;
/// only leaves hold a room.
pub struct BspNode {
    pub bounds: Rect,
    pub room: Option<Rect>,
    pub child1: Option<Box<BspNode>>,
    pub child2: Option<Box<BspNode>>,
}

impl BspNode {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            room: None,
            child1: None,
            child2: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.child1.is_none() && self.child2.is_none()
    }

    /// Split this region and its descendants, depth-first, child1 before
    /// child2. `split_count` is shared across the whole recursion, so early
    /// branches can exhaust the budget for later ones.
    pub fn recursive_split(
        &mut self,
        random: &mut RandomService,
        min_room_size: i32,
        max_rooms: i32,
        split_count: &mut i32,
        max_steps: i32,
    ) {
        self.split_branch(random, min_room_size, max_rooms, split_count, max_steps, 0);
    }

    fn split_branch(
        &mut self,
        random: &mut RandomService,
        min_room_size: i32,
        max_rooms: i32,
        split_count: &mut i32,
        max_steps: i32,
        depth: i32,
    ) {
        if *split_count >= max_rooms || depth >= max_steps {
            return;
        }
        if !self.can_split(min_room_size * 2) {
            return;
        }
        if !self.split(random, min_room_size) {
            return;
        }
        // Count successful splits only; rejected attempts don't spend budget.
        *split_count += 1;
        if let Some(child) = self.child1.as_deref_mut() {
            child.split_branch(random, min_room_size, max_rooms, split_count, max_steps, depth + 1);
        }
        if let Some(child) = self.child2.as_deref_mut() {
            child.split_branch(random, min_room_size, max_rooms, split_count, max_steps, depth + 1);
        }
    }

    fn can_split(&self, min_size: i32) -> bool {
        self.bounds.width >= min_size || self.bounds.height >= min_size
    }

    /// Try to split the bounds in two. Returns false when the chosen axis
    /// has no room for two children of `min_room_size`.
    fn split(&mut self, random: &mut RandomService, min_room_size: i32) -> bool {
        let width = self.bounds.width as f32;
        let height = self.bounds.height as f32;
        let split_horizontal = if height / width >= SPLIT_RATIO {
            true
        } else if width / height >= SPLIT_RATIO {
            false
        } else {
            random.chance(0.5)
        };

        let span = if split_horizontal {
            self.bounds.height
        } else {
            self.bounds.width
        };
        let max = span - min_room_size * 2;
        if max <= min_room_size * 2 {
            return false;
        }
        let offset = random.range(min_room_size, max);

        let b = self.bounds;
        let (first, second) = if split_horizontal {
            (
                Rect::new(b.x, b.y, b.width, offset),
                Rect::new(b.x, b.y + offset, b.width, b.height - offset),
            )
        } else {
            (
                Rect::new(b.x, b.y, offset, b.height),
                Rect::new(b.x + offset, b.y, b.width - offset, b.height),
            )
        };
        self.child1 = Some(Box::new(BspNode::new(first)));
        self.child2 = Some(Box::new(BspNode::new(second)));
        true
    }

    /// Pick a room inside this leaf's bounds, inset by `spacing` per side.
    ///
    /// When the inset leaves less than `min_room_size` the size is clamped
    /// back up and the room may touch or overrun the bound edge; degenerate
    /// regions still get a room rather than failing.
    pub fn create_room(
        &mut self,
        random: &mut RandomService,
        min_room_size: i32,
        max_room_size: i32,
        spacing: i32,
    ) {
        let max_width = max_room_size
            .min(self.bounds.width - 2 * spacing)
            .max(min_room_size);
        let max_height = max_room_size
            .min(self.bounds.height - 2 * spacing)
            .max(min_room_size);

        let room_width = random.range(min_room_size, max_width + 1);
        let room_height = random.range(min_room_size, max_height + 1);
        let room_x = random.range(
            self.bounds.x + spacing,
            self.bounds.x_max() - spacing - room_width + 1,
        );
        let room_y = random.range(
            self.bounds.y + spacing,
            self.bounds.y_max() - spacing - room_height + 1,
        );
        self.room = Some(Rect::new(room_x, room_y, room_width, room_height));
    }

    /// Representative room center for corridor connection: a leaf's own
    /// room, otherwise the first descendant found through child1.
    pub fn room_center(&self) -> (i32, i32) {
        if let Some(room) = &self.room {
            return room.center();
        }
        if let Some(child) = &self.child1 {
            return child.room_center();
        }
        if let Some(child) = &self.child2 {
            return child.room_center();
        }
        self.bounds.center()
    }

    /// Leaves in discovery order (depth-first, child1 before child2).
    pub fn leaves(&self) -> Vec<&BspNode> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    fn leaves_mut(&mut self) -> Vec<&mut BspNode> {
        let mut out = Vec::new();
        collect_leaves_mut(self, &mut out);
        out
    }

    /// Carve a corridor between the representative centers of every pair of
    /// sibling subtrees. Every leaf ends up reachable from the root, though
    /// some only transitively through intermediate corridors.
    fn connect_rooms(&self, grid: &mut TileGrid, tile: TileId) {
        if let (Some(child1), Some(child2)) = (&self.child1, &self.child2) {
            carve_corridor(grid, child1.room_center(), child2.room_center(), tile);
            child1.connect_rooms(grid, tile);
            child2.connect_rooms(grid, tile);
        }
    }
}

fn collect_leaves<'a>(node: &'a BspNode, out: &mut Vec<&'a BspNode>) {
    if node.is_leaf() {
        out.push(node);
        return;
    }
    if let Some(child) = node.child1.as_deref() {
        collect_leaves(child, out);
    }
    if let Some(child) = node.child2.as_deref() {
        collect_leaves(child, out);
    }
}

fn collect_leaves_mut<'a>(node: &'a mut BspNode, out: &mut Vec<&'a mut BspNode>) {
    if node.is_leaf() {
        out.push(node);
        return;
    }
    if let Some(child) = node.child1.as_deref_mut() {
        collect_leaves_mut(child, out);
    }
    if let Some(child) = node.child2.as_deref_mut() {
        collect_leaves_mut(child, out);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BspDungeon {
    pub max_rooms: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Cells kept between a room and its partition bounds.
    pub spacing: i32,
    /// Maximum recursion depth for splitting.
    pub max_steps: i32,
    /// Outline every partition's bounds with rock tiles after generation.
    pub show_debug: bool,
}

impl Default for BspDungeon {
    fn default() -> Self {
        Self {
            max_rooms: 10,
            min_room_size: 5,
            max_room_size: 10,
            spacing: 2,
            max_steps: 5,
            show_debug: false,
        }
    }
}

impl GenerationMethod for BspDungeon {
    fn name(&self) -> &'static str {
        "bsp"
    }

    fn generate(&self, ctx: &mut GenerationContext) -> Result<(), GenerationError> {
        let room_tile = ctx.require_tile(ROOM_TILE)?;
        let corridor_tile = ctx.require_tile(CORRIDOR_TILE)?;
        ctx.checkpoint()?;

        let mut root = BspNode::new(Rect::new(0, 0, ctx.grid.width, ctx.grid.length));
        let mut split_count = 0;
        root.recursive_split(
            ctx.random,
            self.min_room_size,
            self.max_rooms,
            &mut split_count,
            self.max_steps,
        );

        let mut leaf_count = 0;
        for leaf in root.leaves_mut() {
            ctx.checkpoint()?;
            leaf.create_room(
                ctx.random,
                self.min_room_size,
                self.max_room_size,
                self.spacing,
            );
            if let Some(room) = leaf.room {
                ctx.place_room(&room, room_tile);
            }
            leaf_count += 1;
            ctx.pace();
        }
        log::debug!("bsp made {split_count} splits into {leaf_count} rooms");

        root.connect_rooms(ctx.grid, corridor_tile);
        ctx.build_ground()?;

        if self.show_debug {
            let rock = ctx.require_tile(ROCK_TILE)?;
            outline_partitions(ctx.grid, &root, rock, room_tile, corridor_tile);
        }
        Ok(())
    }
}

/// Trace every partition's bounds with rock, leaving rooms and corridors
/// visible through the overlay.
fn outline_partitions(
    grid: &mut TileGrid,
    node: &BspNode,
    rock: TileId,
    room: TileId,
    corridor: TileId,
) {
    let b = node.bounds;
    for x in b.x..b.x_max() {
        place_debug_rock(grid, x, b.y, rock, room, corridor);
        place_debug_rock(grid, x, b.y_max() - 1, rock, room, corridor);
    }
    for y in b.y..b.y_max() {
        place_debug_rock(grid, b.x, y, rock, room, corridor);
        place_debug_rock(grid, b.x_max() - 1, y, rock, room, corridor);
    }
    if let Some(child) = node.child1.as_deref() {
        outline_partitions(grid, child, rock, room, corridor);
    }
    if let Some(child) = node.child2.as_deref() {
        outline_partitions(grid, child, rock, room, corridor);
    }
}

fn place_debug_rock(grid: &mut TileGrid, x: i32, y: i32, rock: TileId, room: TileId, corridor: TileId) {
    let current = grid.tile(x, y);
    if current != Some(room) && current != Some(corridor) {
        grid.set_tile(x, y, rock, true);
    }
}
