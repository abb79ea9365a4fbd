//! RNG module - deterministic next-cube generation
//!
//! The host decides which value the next inserted cube carries. This module
//! provides a seedable source for that: a small LCG plus a spawner that draws
//! values uniformly from `MIN_SPAWN_VALUE..=MAX_SPAWN_VALUE` and can preview
//! upcoming draws without consuming them.

use crate::types::{CubeValue, MAX_SPAWN_VALUE, MIN_SPAWN_VALUE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits: the low bits of a power-of-two LCG cycle quickly.
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Source of values for newly inserted cubes
#[derive(Debug, Clone)]
pub struct CubeSpawner {
    seed: u32,
    rng: SimpleRng,
}

impl CubeSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    fn value_from(rng: &mut SimpleRng) -> CubeValue {
        let span = MAX_SPAWN_VALUE - MIN_SPAWN_VALUE + 1;
        MIN_SPAWN_VALUE + rng.next_range(span)
    }

    /// Value the next `draw()` will return
    pub fn peek(&self) -> CubeValue {
        Self::value_from(&mut self.rng.clone())
    }

    /// Preview the next `N` draws without consuming them
    pub fn peek_n<const N: usize>(&self) -> [CubeValue; N] {
        let mut preview = self.rng.clone();
        std::array::from_fn(|_| Self::value_from(&mut preview))
    }

    /// Draw the next cube value
    pub fn draw(&mut self) -> CubeValue {
        Self::value_from(&mut self.rng)
    }

    /// Seed this spawner was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Restart the sequence from the original seed
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.seed);
    }
}

impl Default for CubeSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}
