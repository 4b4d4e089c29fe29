//! Tile template registry.
//!
//! Generation methods refer to tiles by name ("Room", "Grass", ...) and
//! resolve them through the registry once per run. Cells store the interned
//! `TileId` rather than the name.

use std::collections::HashMap;

/// Canonical tile names used by the built-in generation methods.
pub const ROOM_TILE: &str = "Room";
pub const CORRIDOR_TILE: &str = "Corridor";
pub const GRASS_TILE: &str = "Grass";
pub const WATER_TILE: &str = "Water";
pub const SAND_TILE: &str = "Sand";
pub const ROCK_TILE: &str = "Rock";

/// Interned handle to a registered tile template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(u16);

/// A named tile template with a glyph for ASCII rendering.
#[derive(Clone, Debug)]
pub struct TileTemplate {
    pub name: String,
    pub glyph: char,
}

/// Name-keyed store of tile templates.
#[derive(Clone, Debug, Default)]
pub struct TileRegistry {
    templates: Vec<TileTemplate>,
    by_name: HashMap<String, TileId>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the tiles the built-in methods write.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ROOM_TILE, '.');
        registry.register(CORRIDOR_TILE, '+');
        registry.register(GRASS_TILE, '"');
        registry.register(WATER_TILE, '~');
        registry.register(SAND_TILE, ',');
        registry.register(ROCK_TILE, '^');
        registry
    }

    /// Register a template, returning its id. Re-registering a name replaces
    /// the glyph and keeps the existing id.
    pub fn register(&mut self, name: &str, glyph: char) -> TileId {
        if let Some(&id) = self.by_name.get(name) {
            self.templates[id.0 as usize].glyph = glyph;
            return id;
        }
        let id = TileId(self.templates.len() as u16);
        self.templates.push(TileTemplate {
            name: name.to_string(),
            glyph,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up a template by name.
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    pub fn template(&self, id: TileId) -> &TileTemplate {
        &self.templates[id.0 as usize]
    }

    pub fn name(&self, id: TileId) -> &str {
        &self.templates[id.0 as usize].name
    }

    pub fn glyph(&self, id: TileId) -> char {
        self.templates[id.0 as usize].glyph
    }

    /// All registered templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &TileTemplate> {
        self.templates.iter()
    }
}
