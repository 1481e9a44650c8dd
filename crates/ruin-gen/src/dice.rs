//! The seeded random source every generation step draws from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic sequence generator.
///
/// Seeded exactly once; the same seed followed by the same sequence of calls
/// always produces the same results.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `min..max`. Returns `min` without consuming state
    /// when the range is empty.
    pub fn roll(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// True with `percent`% probability. Always consumes one roll.
    pub fn roll_chance(&mut self, percent: i32) -> bool {
        self.roll(0, 100) < percent
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero.
    pub fn roll_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniform pick from a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.roll_index(items.len()).map(|i| &items[i])
    }
}
