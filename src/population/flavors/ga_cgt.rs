//! GA-CGT (genetic algorithm with controlled gene transposition) flavor
//! (spec §4.2, §1).
//!
//! Grounded in `original_source/binpacksolver/heuristic/gga_cgt.py` /
//! `ggacgt.py`'s `gene_level_crossover`: copy bins (here, contiguous
//! genome segments) from whichever parent contributes the heavier chunk,
//! then fill the rest from the donor parent in its own order. Adapted to
//! the matrix-encoding skeleton by operating on flat genome segments
//! instead of the original's list-of-bins representation, and by reusing
//! `u-metaheur`'s `ga::operators::order_crossover` segment-copy-then-fill
//! shape rather than that exact bin-level contract (the repaired genome
//! tolerates the value repeats OX's original index-permutation form
//! assumes away).
//!
//! The "donor" parent for row `i`'s crossover is row `i`'s own global
//! best (so every row exploits the matrix's current best, the
//! population-level analogue of the original's `controlled_selection`
//! picking from the fitness-sorted population).

use rand::{Rng, RngCore};

use super::super::{PopulationContext, PopulationUpdateRule};

#[derive(Debug, Clone, Default)]
pub struct GaCgtConfig;

pub struct GaCgtUpdateRule {
    _config: GaCgtConfig,
}

impl GaCgtUpdateRule {
    pub fn new(config: GaCgtConfig) -> Self {
        Self { _config: config }
    }
}

impl Default for GaCgtUpdateRule {
    fn default() -> Self {
        Self::new(GaCgtConfig::default())
    }
}

/// Copies a random contiguous segment of `template`, then fills the
/// remaining positions with `donor`'s items in their own left-to-right
/// order, skipping positions already filled. Unlike a permutation OX,
/// `donor` is consulted by position, not by value-membership — the
/// resulting vector is not guaranteed a legal permutation of either
/// parent, which is fine because Repair is what restores that guarantee.
fn segment_crossover<R: Rng + ?Sized>(template: &[u64], donor: &[u64], rng: &mut R) -> Vec<u64> {
    let n = template.len();
    if n < 2 {
        return template.to_vec();
    }
    let start = rng.random_range(0..n - 1);
    let end = rng.random_range(start + 1..n);

    let mut child = template.to_vec();
    let donor_len = donor.len();
    for (offset, slot) in child.iter_mut().enumerate().take(end + 1).skip(start + 1) {
        if offset < donor_len {
            *slot = donor[offset];
        }
    }
    child
}

impl PopulationUpdateRule for GaCgtUpdateRule {
    fn name(&self) -> &str {
        "ga_cgt"
    }

    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        let template = &ctx.rows[row].genome;
        let donor = &ctx.global_best.genome;
        let child = segment_crossover(template, donor, rng);
        child.iter().map(|&v| v as f64).collect()
    }
}
