//! Seedable RNG helpers shared by every heuristic.
//!
//! Each heuristic owns a private RNG created here so that a fixed seed
//! reproduces a fixed run, and so that concurrent heuristics never share
//! mutable RNG state (see the driver's concurrency model).

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Creates a deterministic RNG from a `u64` seed.
pub fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates an RNG seeded from the system entropy source.
pub fn create_unseeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_rng(&mut rand::rng())
}

/// Shuffles `slice` in place using Fisher-Yates.
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    slice.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        let xs: Vec<u32> = (0..10).map(|_| a.random_range(0..1000)).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.random_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn shuffle_preserves_multiset() {
        let mut rng = create_rng(1);
        let mut v: Vec<i32> = (0..20).collect();
        let original = v.clone();
        shuffle(&mut v, &mut rng);
        let mut sorted = v.clone();
        sorted.sort();
        let mut orig_sorted = original.clone();
        orig_sorted.sort();
        assert_eq!(sorted, orig_sorted);
    }
}
