//! Per-call deterministic RNG for ridge placement.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Every
//! `generate` call owns a fresh instance seeded from its parameters, so two
//! calls never share random state and identical seeds give identical ridges.

use bevy::math::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RidgeRng(pub ChaCha8Rng);

impl RidgeRng {
    /// Create a new `RidgeRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }

    /// Uniform point in the unit square, x drawn before y.
    pub fn point(&mut self) -> Vec2 {
        let x = self.unit();
        let y = self.unit();
        Vec2::new(x, y)
    }
}
