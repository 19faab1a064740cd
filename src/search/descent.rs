//! Descent (spec §4.8).
//!
//! Grounded directly in `original_source/.../cns.py`'s `__descent`/
//! `__pack_items` private functions: repeatedly shuffle the bin order and
//! re-sweep each bin merged with the unplaced reservoir through the VALID
//! one-pass sweep, keeping only the last swept bin in place and returning
//! every earlier swept bin's items to the reservoir, until the reservoir
//! collapses into at most two First-Fit bins.

use rand::Rng;

use crate::encoding::valid_sweep;
use crate::packing::{first_fit, Bin};
use crate::random::shuffle;

#[derive(Debug, Clone)]
pub struct DescentConfig {
    pub max_attempts: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self { max_attempts: 50 }
    }
}

impl DescentConfig {
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }
}

/// Result of a descent run: the updated bins, the (possibly non-empty)
/// unplaced reservoir, and how many outer rounds ran.
#[derive(Debug, Clone)]
pub struct DescentResult {
    pub bins: Vec<Bin>,
    pub unplaced: Vec<u64>,
    pub rounds: usize,
}

pub struct DescentRunner;

impl DescentRunner {
    pub fn run<R: Rng + ?Sized>(
        mut bins: Vec<Bin>,
        mut unplaced: Vec<u64>,
        capacity: u64,
        config: &DescentConfig,
        rng: &mut R,
    ) -> DescentResult {
        let mut rounds = 0usize;

        for _ in 0..config.max_attempts {
            rounds += 1;
            shuffle(&mut bins, rng);

            for bin in bins.iter_mut() {
                *bin = pack_items(bin, &mut unplaced, capacity);
            }

            let mut ff_bins = Vec::new();
            first_fit(&unplaced, capacity, &mut ff_bins);
            if ff_bins.len() <= 2 {
                bins.extend(ff_bins);
                unplaced.clear();
                break;
            }
        }

        DescentResult { bins, unplaced, rounds }
    }
}

/// Merges `bin` with the reservoir as one ascending multiset, re-sweeps it
/// via VALID, keeps the last output bin in place of `bin`, and pushes
/// every earlier output bin's items back onto the reservoir.
fn pack_items(bin: &Bin, unplaced: &mut Vec<u64>, capacity: u64) -> Bin {
    let mut merged = bin.items().to_vec();
    merged.extend(unplaced.drain(..));
    merged.sort_unstable();

    let mut packed = valid_sweep(&merged, capacity);
    if packed.is_empty() {
        return Bin::default();
    }

    let last = packed.pop().expect("packed is non-empty");
    for leftover in packed {
        unplaced.extend_from_slice(leftover.items());
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn pack_items_conserves_mass_between_bin_and_reservoir() {
        let bin = Bin::new(vec![4, 4]);
        let mut unplaced = vec![1, 2, 3];
        let total_before: u64 = bin.load() + unplaced.iter().sum::<u64>();
        let result = pack_items(&bin, &mut unplaced, 10);
        let total_after: u64 = result.load() + unplaced.iter().sum::<u64>();
        assert_eq!(total_before, total_after);
    }

    #[test]
    fn run_empties_reservoir_when_it_fits_in_two_bins() {
        let bins = vec![Bin::new(vec![5]), Bin::new(vec![5])];
        let unplaced = vec![1, 1];
        let mut rng = create_rng(9);
        let config = DescentConfig::default();
        let result = DescentRunner::run(bins, unplaced, 10, &config, &mut rng);
        assert!(result.unplaced.is_empty());
        assert!(result.bins.iter().all(|b| b.respects_capacity(10)));
    }

    #[test]
    fn run_conserves_total_mass() {
        let bins = vec![Bin::new(vec![6, 3]), Bin::new(vec![7])];
        let unplaced = vec![2, 2, 2, 2];
        let total_before: u64 = bins.iter().map(Bin::load).sum::<u64>() + unplaced.iter().sum::<u64>();
        let mut rng = create_rng(11);
        let config = DescentConfig::default().with_max_attempts(10);
        let result = DescentRunner::run(bins, unplaced, 10, &config, &mut rng);
        let total_after: u64 =
            result.bins.iter().map(Bin::load).sum::<u64>() + result.unplaced.iter().sum::<u64>();
        assert_eq!(total_before, total_after);
    }
}
