//! Artificial Bee Colony flavor (spec §4.2, §1).
//!
//! `original_source/binpacksolver/heuristic/abc.py`'s bees hold container
//! solutions directly (`Bee.source`/`Bee.container`), not numeric
//! vectors: `__bee_operation` samples a bin-index pair `(l, r)` within
//! the solution's own bin count and applies `container_insert`. This
//! flavor is the one named in spec §4.2's "each flavor supplies only its
//! numeric update formula" where the formula is, honestly, a discrete
//! container move — `update_row` decodes the row's genome to a `Packing`,
//! samples a bin pair the way `__bee_operation` does, applies
//! [`crate::container::insert`], and re-flattens, demonstrating the
//! shared matrix skeleton tolerates a flavor whose "numeric update" isn't
//! numeric at all.
//!
//! The employed/onlooker/scout three-phase structure of the original
//! (`__employed_bees`, `__onlooker_bees` via `tournament_roulette`,
//! `__scout_bees`) collapses here into the shared skeleton's own
//! iterate-every-row loop (the employed phase) plus an onlooker pass
//! applied once per outer iteration through `local_search`, which probes
//! one extra candidate bin-pair move chosen by
//! [`crate::primitives::tournament_roulette`] weighted by the *current*
//! population's fitnesses and keeps it only if it improves the row.

use rand::{Rng, RngCore};

use crate::container;
use crate::encoding::{genome_to_packing, valid_sweep, GenerationMode};
use crate::primitives::tournament_roulette;

use super::super::{Genome, PopulationContext, PopulationUpdateRule};

#[derive(Debug, Clone)]
pub struct AbcConfig {
    /// Selection-pressure exponent for the onlooker phase's
    /// `tournament_roulette` draw (the original's `gama`, default 1.8).
    pub gamma: f64,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self { gamma: 1.8 }
    }
}

pub struct AbcUpdateRule {
    config: AbcConfig,
}

impl AbcUpdateRule {
    pub fn new(config: AbcConfig) -> Self {
        Self { config }
    }
}

impl Default for AbcUpdateRule {
    fn default() -> Self {
        Self::new(AbcConfig::default())
    }
}

/// One `__bee_operation`-style move: sample a bin-index pair within the
/// packing's own bin count and apply the composite container move.
fn bee_operation<R: Rng + ?Sized>(genome: &[u64], capacity: u64, rng: &mut R) -> Vec<u64> {
    let packing = genome_to_packing(genome, capacity, GenerationMode::Valid);
    let mut bins = packing.into_bins();
    let n = bins.len();
    if n < 2 {
        return genome.to_vec();
    }
    let l = rng.random_range(0..n - 1);
    let r = rng.random_range(l + 1..n);
    container::insert(&mut bins, l, r, capacity);
    bins.into_iter().flat_map(crate::packing::Bin::into_items).collect()
}

impl PopulationUpdateRule for AbcUpdateRule {
    fn name(&self) -> &str {
        "abc"
    }

    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        let moved = bee_operation(&ctx.rows[row].genome, ctx.capacity, rng);
        moved.iter().map(|&v| v as f64).collect()
    }

    fn local_search(&self, genome: &mut Genome, capacity: u64, rng: &mut dyn RngCore) {
        // Onlooker phase: probe one more bee move, then let the roulette
        // draw over [current, trial] fitnesses pick which source the row
        // adopts — fitter sources more likely to be chosen, the way
        // `__onlooker_bees` weights sources by `tournament_roulette`,
        // rather than a deterministic improve-or-keep rule.
        let current_fitness = valid_sweep(genome, capacity).len();
        let trial = bee_operation(genome, capacity, rng);
        let trial_fitness = valid_sweep(&trial, capacity).len();

        let sources = [current_fitness, trial_fitness];
        let chosen = tournament_roulette(&sources, self.config.gamma, rng);
        if chosen == 1 {
            *genome = trial;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::runner::PopulationRunner;
    use crate::population::PopulationConfig;
    use crate::random::create_rng;

    #[test]
    fn bee_operation_conserves_mass() {
        let mut rng = create_rng(5);
        let genome = vec![8, 7, 6, 5, 4, 3, 2, 1];
        let moved = bee_operation(&genome, 10, &mut rng);
        let mut a = genome.clone();
        let mut b = moved.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn bee_operation_is_noop_on_single_bin() {
        let mut rng = create_rng(1);
        let genome = vec![5, 4];
        let moved = bee_operation(&genome, 10, &mut rng);
        assert_eq!(moved, genome);
    }

    #[test]
    fn abc_runner_finds_a_feasible_packing() {
        let items = vec![9, 8, 7, 6, 5, 4, 3, 2, 1];
        let capacity = 10;
        let tm = crate::primitives::lower_bound(&items, capacity);
        let rule = AbcUpdateRule::default();
        let config = PopulationConfig::default()
            .with_population_size(6)
            .with_max_iterations(15)
            .with_seed(51);
        let result = PopulationRunner::run(&items, capacity, tm, &rule, &config);
        assert!(result.packing.respects_capacity(capacity));
        assert!(result.packing.conserves_mass(&items));
    }
}
