//! Repair: forces a candidate encoding back onto the legal input multiset
//! (spec §4.3).
//!
//! This is the bridge every population-metaheuristic numeric update rule
//! crosses before its candidate genome can be evaluated: continuous
//! operators (velocity updates, crossovers) routinely produce values
//! outside the reference multiset, and repair is what makes the result
//! a legal permutation of it again.

use crate::encoding::{genome_to_packing, packing_to_genome, GenerationMode};
use crate::packing::best_fit_decreasing_into;
use crate::random::shuffle;
use rand::Rng;
use std::collections::HashMap;

/// Repairs `candidate` against the reference multiset of `original`.
///
/// Returns an encoding whose multiset equals that of `original`. `rng` is
/// only consulted in the degenerate case where the candidate accepts
/// none of the reference multiset.
pub fn repair<R: Rng>(original: &[u64], candidate: &[u64], capacity: u64, rng: &mut R) -> Vec<u64> {
    let mut remaining: HashMap<u64, usize> = HashMap::new();
    for &item in original {
        *remaining.entry(item).or_insert(0) += 1;
    }

    let mut accepted: Vec<u64> = Vec::with_capacity(candidate.len());
    for &y in candidate {
        if let Some(count) = remaining.get_mut(&y) {
            if *count > 0 {
                *count -= 1;
                accepted.push(y);
                continue;
            }
        }
    }

    if accepted.is_empty() {
        let mut shuffled = original.to_vec();
        shuffle(&mut shuffled, rng);
        return shuffled;
    }

    // R: what candidate failed to spend from the reference multiset.
    let mut leftover: Vec<u64> = Vec::new();
    for (&item, &count) in remaining.iter() {
        leftover.extend(std::iter::repeat(item).take(count));
    }

    // Pack `accepted` into a VALID packing, then BFD the leftovers onto it.
    let seed_packing = genome_to_packing(&accepted, capacity, GenerationMode::Valid);
    let mut bins = seed_packing.into_bins();
    best_fit_decreasing_into(&mut bins, &leftover, capacity);

    packing_to_genome(&crate::packing::Packing::new(bins))
}
