//! RNG module - uniform random shape selection
//!
//! Each spawn picks one of the seven shapes with equal probability. There is
//! no bag: repeats are allowed. The generator is a seeded ChaCha stream, so a
//! session built from the same seed replays the same shape sequence.

use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha12Rng};

use crate::types::Shape;

/// Uniform shape picker
#[derive(Debug, Clone)]
pub struct ShapeRandomizer {
    seed: u64,
    rng: ChaCha12Rng,
}

impl ShapeRandomizer {
    /// Create a randomizer with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Create a randomizer seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick the next shape
    pub fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.random_range(0..Shape::ALL.len())]
    }
}

impl Iterator for ShapeRandomizer {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        Some(self.next_shape())
    }
}
