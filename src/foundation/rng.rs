use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

/// Uniform randomness seam for rarity draws and trait picks.
///
/// Draw order is part of the contract: one `next_percent` per trait type for
/// the occurrence gate, one per rarity-bucket draw, and one `pick_index` per
/// non-empty candidate set. Scripted sources in tests rely on this ordering.
pub trait RandomSource {
    /// Uniform integer in `[0, 100)`.
    fn next_percent(&mut self) -> u32;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Deterministic source backed by `ChaCha8Rng`.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Per-collectible source under a collection seed.
    ///
    /// The stream depends only on `(seed, id)`, which is what makes
    /// sequential and parallel generation agree.
    pub fn for_collectible(seed: u64, id: u32) -> Self {
        Self::new(mix(seed, id))
    }
}

impl RandomSource for SeededSource {
    fn next_percent(&mut self) -> u32 {
        self.rng.random_range(0..100)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

// splitmix64-style finalizer; adjacent ids must not produce correlated
// ChaCha seeds.
fn mix(seed: u64, id: u32) -> u64 {
    let mut z = seed ^ u64::from(id).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Replays a fixed sequence of values, for reproducing exact draw paths.
///
/// `next_percent` returns the next value modulo 100; `pick_index` returns it
/// modulo `len`. An exhausted script yields 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_percent(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(0) % 100
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.values.pop_front().unwrap_or(0) as usize % len.max(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
