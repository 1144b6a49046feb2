//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A seedable, deterministically-replayable pseudo-random source. Every
//! stochastic choice the sampler makes goes through one of these.
//!
//! Two PRNG families are available, selected at construction time:
//! ChaCha8 by default, for its wider adoption as a "strong enough, fast
//! enough" general-purpose deterministic generator, and XorShift for
//! callers who want the cheapest possible draw and don't care about
//! distributional niceties.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_xorshift::XorShiftRng;

/// Selects which concrete PRNG algorithm backs a [`Rng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngAlgorithm {
    /// ChaCha8, the default: good statistical quality, not
    /// cryptographically relied upon here but pleasant to reason about.
    ChaCha,
    /// XorShift: faster, lower statistical quality, for callers who want
    /// the cheapest possible draw and don't care about distributional
    /// niceties.
    XorShift,
}

impl Default for RngAlgorithm {
    fn default() -> Self {
        RngAlgorithm::ChaCha
    }
}

enum Core {
    ChaCha(ChaCha8Rng),
    XorShift(XorShiftRng),
}

/// A seed value accepted by [`crate::StringGenBuilder::seed`]: an integer,
/// a floating-point number, or a string/byte sequence that gets hashed
/// into the seed state.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    Int(u64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl From<u64> for Seed {
    fn from(v: u64) -> Self {
        Seed::Int(v)
    }
}

impl From<i64> for Seed {
    fn from(v: i64) -> Self {
        Seed::Int(v as u64)
    }
}

impl From<f64> for Seed {
    fn from(v: f64) -> Self {
        Seed::Float(v)
    }
}

impl From<&str> for Seed {
    fn from(v: &str) -> Self {
        Seed::Bytes(v.as_bytes().to_vec())
    }
}

impl From<String> for Seed {
    fn from(v: String) -> Self {
        Seed::Bytes(v.into_bytes())
    }
}

impl From<&[u8]> for Seed {
    fn from(v: &[u8]) -> Self {
        Seed::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Seed {
    fn from(v: Vec<u8>) -> Self {
        Seed::Bytes(v)
    }
}

/// Collapses any [`Seed`] into the 64-bit seed `ChaCha8Rng`/`XorShiftRng`
/// expand internally via `SeedableRng::seed_from_u64`. Strings and byte
/// sequences go through the standard library's `DefaultHasher` (SipHash)
/// rather than a dedicated seed-hashing crate.
fn seed_to_u64(seed: &Seed) -> u64 {
    match seed {
        Seed::Int(v) => *v,
        Seed::Float(v) => v.to_bits(),
        Seed::Bytes(bytes) => {
            let mut hasher = DefaultHasher::new();
            bytes.hash(&mut hasher);
            hasher.finish()
        }
    }
}

/// The generator's single source of non-determinism.
pub struct Rng {
    core: Core,
}

impl Rng {
    /// Builds a deterministic engine from a seed, using the given
    /// algorithm.
    pub fn from_seed_with(seed: Seed, algorithm: RngAlgorithm) -> Rng {
        let n = seed_to_u64(&seed);
        Rng {
            core: match algorithm {
                RngAlgorithm::ChaCha => {
                    Core::ChaCha(ChaCha8Rng::seed_from_u64(n))
                }
                RngAlgorithm::XorShift => {
                    Core::XorShift(XorShiftRng::seed_from_u64(n))
                }
            },
        }
    }

    /// Builds a deterministic engine from a seed, using the default
    /// algorithm.
    pub fn from_seed(seed: Seed) -> Rng {
        Rng::from_seed_with(seed, RngAlgorithm::default())
    }

    /// Builds an engine seeded from the process's entropy source. Not
    /// reproducible across runs; used when no `seed` was supplied.
    pub fn from_entropy() -> Rng {
        Rng::from_entropy_with(RngAlgorithm::default())
    }

    /// Builds an engine seeded from the process's entropy source, using the
    /// given algorithm.
    pub fn from_entropy_with(algorithm: RngAlgorithm) -> Rng {
        let n: u64 = rand::random();
        Rng {
            core: match algorithm {
                RngAlgorithm::ChaCha => Core::ChaCha(ChaCha8Rng::seed_from_u64(n)),
                RngAlgorithm::XorShift => {
                    Core::XorShift(XorShiftRng::seed_from_u64(n))
                }
            },
        }
    }

    /// Replaces this engine's state, replaying deterministically from the
    /// new seed from this point forward.
    pub fn reseed(&mut self, seed: Seed) {
        let n = seed_to_u64(&seed);
        self.core = match &self.core {
            Core::ChaCha(_) => Core::ChaCha(ChaCha8Rng::seed_from_u64(n)),
            Core::XorShift(_) => {
                Core::XorShift(XorShiftRng::seed_from_u64(n))
            }
        };
    }

    /// A uniform integer in `[0, n)`. Panics if `n == 0`.
    pub fn uniform_below(&mut self, n: u32) -> u32 {
        use rand::Rng as _;
        self.gen_range(0..n)
    }

    /// A uniform integer in the inclusive range `[lo, hi]`. Panics if
    /// `lo > hi`.
    pub fn uniform_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        use rand::Rng as _;
        self.gen_range(lo..=hi)
    }

    /// Uniform selection of one element from a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.uniform_below(items.len() as u32) as usize;
        &items[idx]
    }
}

impl RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        match &mut self.core {
            Core::ChaCha(r) => r.next_u32(),
            Core::XorShift(r) => r.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match &mut self.core {
            Core::ChaCha(r) => r.next_u64(),
            Core::XorShift(r) => r.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match &mut self.core {
            Core::ChaCha(r) => r.fill_bytes(dest),
            Core::XorShift(r) => r.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(
        &mut self,
        dest: &mut [u8],
    ) -> core::result::Result<(), rand::Error> {
        match &mut self.core {
            Core::ChaCha(r) => r.try_fill_bytes(dest),
            Core::XorShift(r) => r.try_fill_bytes(dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::from_seed(Seed::Int(42));
        let mut b = Rng::from_seed(Seed::Int(42));
        for _ in 0..16 {
            assert_eq!(a.uniform_below(1_000_000), b.uniform_below(1_000_000));
        }
    }

    #[test]
    fn reseed_replays_deterministically() {
        let mut a = Rng::from_seed(Seed::Int(7));
        let first: Vec<u32> =
            (0..8).map(|_| a.uniform_below(1_000)).collect();
        a.reseed(Seed::Int(7));
        let second: Vec<u32> =
            (0..8).map(|_| a.uniform_below(1_000)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn string_and_bytes_seeds_agree() {
        let mut a = Rng::from_seed(Seed::from("hello"));
        let mut b = Rng::from_seed(Seed::from(b"hello".to_vec()));
        assert_eq!(a.uniform_below(1_000_000), b.uniform_below(1_000_000));
    }
}
