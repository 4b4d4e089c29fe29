//! Seeded random service shared by all generation methods.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random source for a single generation run.
///
/// Every method draws from the same service so a fixed seed reproduces the
/// whole layout.
pub struct RandomService {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomService {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed this service was built with. Stable for the whole run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[min, max)`. An empty range yields `min`, which lets
    /// degenerate configurations fall back to the smallest legal value
    /// instead of failing.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Bernoulli trial with the given success probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}
