//! Coherent-noise biome banding.
//!
//! Samples a seeded OpenSimplex field at every cell and classifies the
//! sample into ordered bands by ascending thresholds, first match wins:
//! water, then sand, grass and rock. A sample above every threshold writes
//! nothing and leaves the cell as it was.

use noise::{NoiseFn, OpenSimplex, Seedable};
use serde::{Deserialize, Serialize};

use crate::method::{GenerationContext, GenerationError, GenerationMethod};
use crate::registry::{GRASS_TILE, ROCK_TILE, SAND_TILE, WATER_TILE};

/// One of the ordered biome bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiomeBand {
    Water,
    Sand,
    Grass,
    Rock,
}

impl BiomeBand {
    pub fn tile_name(self) -> &'static str {
        match self {
            BiomeBand::Water => WATER_TILE,
            BiomeBand::Sand => SAND_TILE,
            BiomeBand::Grass => GRASS_TILE,
            BiomeBand::Rock => ROCK_TILE,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoiseBiomes {
    /// Upper threshold of each band, checked in declaration order.
    pub high_water: f64,
    pub high_sand: f64,
    pub high_grass: f64,
    pub high_rock: f64,
    /// Noise frequency; higher values make smaller features.
    pub frequency: f64,
}

impl Default for NoiseBiomes {
    fn default() -> Self {
        Self {
            high_water: -0.35,
            high_sand: -0.2,
            high_grass: 0.3,
            high_rock: 1.0,
            frequency: 0.1,
        }
    }
}

impl NoiseBiomes {
    /// Classify a noise sample. Thresholds are tested in band order, so
    /// overlapping thresholds resolve to the earlier band.
    pub fn classify(&self, sample: f64) -> Option<BiomeBand> {
        if sample < self.high_water {
            Some(BiomeBand::Water)
        } else if sample < self.high_sand {
            Some(BiomeBand::Sand)
        } else if sample < self.high_grass {
            Some(BiomeBand::Grass)
        } else if sample < self.high_rock {
            Some(BiomeBand::Rock)
        } else {
            None
        }
    }
}

impl GenerationMethod for NoiseBiomes {
    fn name(&self) -> &'static str {
        "noise"
    }

    fn generate(&self, ctx: &mut GenerationContext) -> Result<(), GenerationError> {
        let water = ctx.require_tile(WATER_TILE)?;
        let sand = ctx.require_tile(SAND_TILE)?;
        let grass = ctx.require_tile(GRASS_TILE)?;
        let rock = ctx.require_tile(ROCK_TILE)?;
        ctx.checkpoint()?;

        let field = OpenSimplex::new(1).set_seed(ctx.random.seed() as u32);
        for x in 0..ctx.grid.width {
            for y in 0..ctx.grid.length {
                let sample = field.get([x as f64 * self.frequency, y as f64 * self.frequency]);
                let tile = match self.classify(sample) {
                    Some(BiomeBand::Water) => water,
                    Some(BiomeBand::Sand) => sand,
                    Some(BiomeBand::Grass) => grass,
                    Some(BiomeBand::Rock) => rock,
                    None => continue,
                };
                ctx.grid.set_tile(x, y, tile, true);
            }
        }
        Ok(())
    }
}
