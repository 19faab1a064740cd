//! Conversions between the flat item-sequence encoding ("genome") and the
//! bag-of-bins packing representation (spec §2.3, §4.5).

use crate::packing::{best_fit_decreasing, first_fit, first_fit_decreasing, Bin, Packing};

/// The packing-generation modes the generator recognizes (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Sort items descending, wrap each in its own bin. Degenerate but legal.
    SortDescSingleton,
    /// First-Fit sweep of the given order.
    Ff,
    /// First-Fit-Decreasing.
    Ffd,
    /// Best-Fit-Decreasing.
    Bfd,
    /// Linear one-pass sweep, opening a new bin at every overflow.
    Valid,
}

/// The VALID sweep: walks `genome` left to right, appending each item to
/// the currently-open bin if it fits, else closing that bin and opening
/// a new one with the item. This is the canonical decoder for "the
/// fitness of an encoding" (spec §3).
pub fn valid_sweep(genome: &[u64], capacity: u64) -> Vec<Bin> {
    let mut bins: Vec<Vec<u64>> = Vec::new();
    let mut current: Vec<u64> = Vec::new();
    let mut current_load: u64 = 0;

    for &item in genome {
        if current_load + item <= capacity {
            current.push(item);
            current_load += item;
        } else {
            if !current.is_empty() {
                bins.push(std::mem::take(&mut current));
            }
            current.push(item);
            current_load = item;
        }
    }
    if !current.is_empty() {
        bins.push(current);
    }

    bins.into_iter().map(Bin::new).collect()
}

/// Converts a genome into a `Packing` under the chosen generation mode.
pub fn genome_to_packing(genome: &[u64], capacity: u64, mode: GenerationMode) -> Packing {
    let bins = match mode {
        GenerationMode::SortDescSingleton => {
            let mut sorted = genome.to_vec();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            sorted.into_iter().map(|item| Bin::new(vec![item])).collect()
        }
        GenerationMode::Ff => {
            let mut bins = Vec::new();
            first_fit(genome, capacity, &mut bins);
            bins
        }
        GenerationMode::Ffd => first_fit_decreasing(genome, capacity),
        GenerationMode::Bfd => best_fit_decreasing(genome, capacity),
        GenerationMode::Valid => valid_sweep(genome, capacity),
    };
    Packing::new(bins)
}

/// Flattens a `Packing` back into a flat genome by concatenating its bins in order.
pub fn packing_to_genome(packing: &Packing) -> Vec<u64> {
    packing.flatten()
}
