//! Random sources

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource {
    fn uniform(&mut self) -> f64;

    /// Uniform index in `[0, n)`; `n` must be non-zero
    fn index(&mut self, n: usize) -> usize {
        let i = (self.uniform() * n as f64).floor() as usize;
        i.min(n.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Deterministic PCG stream for a run seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of rolls, then falls back to a seeded stream
///
/// Lets tests force a particular food draw or bonus roll.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: VecDeque<f64>,
    fallback: Pcg32,
}

impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: rolls.into_iter().collect(),
            fallback: seeded_rng(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        match self.script.pop_front() {
            Some(roll) => roll.clamp(0.0, 0.999_999_999),
            None => self.fallback.uniform(),
        }
    }
}
