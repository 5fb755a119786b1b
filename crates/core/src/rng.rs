//! RNG module - uniform random piece generation
//!
//! Every draw is an independent uniform pick among the seven kinds; there is no
//! bag, so repeats are allowed. Seeded generators are fully deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
}

impl PieceGenerator {
    /// Create a generator from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator from `seed`, or from a fresh random seed when `None`.
    ///
    /// The chosen seed is kept so an unseeded round can still be replayed.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(|| rand::thread_rng().gen()))
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Seed this generator was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
