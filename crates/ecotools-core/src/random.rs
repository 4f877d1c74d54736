//! Random sources for the simulated widgets
//!
//! Widgets draw every random number through [`RandomSource`] so tests can
//! replace the generator with a scripted sequence.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed numbers in `[0, 1)`
pub trait RandomSource: Send {
    /// Draw the next number in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform delta in `[-half_width, +half_width)`
    fn next_delta(&mut self, half_width: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * half_width
    }

    /// Uniform integer in `[0, upper)`
    fn next_below(&mut self, upper: u32) -> u32 {
        ((self.next_unit() * upper as f64).floor() as u32).min(upper.saturating_sub(1))
    }
}

/// Production random source backed by `StdRng`
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of values, then repeats `fallback` forever
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    /// Create a source that yields `values` in order, then 0.5 (a zero delta)
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// A source that always yields the same value
    pub fn constant(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    /// Number of scripted values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
