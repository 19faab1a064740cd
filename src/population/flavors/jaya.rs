//! Jaya flavor (spec §4.2, §1).
//!
//! Grounded directly in `original_source/binpacksolver/heuristic/jaya.py`'s
//! `jaya_optimization`: each candidate moves toward the current best row
//! and away from the current worst row, with no algorithm-specific
//! parameters of its own (Jaya is famously parameter-free).
//!
//! Applies spec §9 Open Question 2's clamp explicitly: `ctx.rows[row]`'s
//! width is the item count, and since every row in this crate's
//! population matrix is already held at that fixed width (unlike the
//! Python reference's row-slicing that can drop columns), the candidate
//! is already correctly sized — the clamp here is a defensive truncation
//! to `ctx.rows[row].genome.len()` in case a future flavor ever violates
//! that invariant upstream.

use rand::{Rng, RngCore};

use super::super::{PopulationContext, PopulationUpdateRule};

#[derive(Debug, Clone, Default)]
pub struct JayaConfig;

pub struct JayaUpdateRule {
    _config: JayaConfig,
}

impl JayaUpdateRule {
    pub fn new(config: JayaConfig) -> Self {
        Self { _config: config }
    }
}

impl Default for JayaUpdateRule {
    fn default() -> Self {
        Self::new(JayaConfig::default())
    }
}

impl PopulationUpdateRule for JayaUpdateRule {
    fn name(&self) -> &str {
        "jaya"
    }

    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        let n = ctx.rows[row].genome.len();
        let worst = ctx.worst_row_index();

        let current: Vec<f64> = ctx.rows[row].genome.iter().map(|&v| v as f64).collect();
        let best: Vec<f64> = ctx.global_best.genome.iter().map(|&v| v as f64).collect();
        let worst_solution: Vec<f64> = ctx.rows[worst].genome.iter().map(|&v| v as f64).collect();

        // Open Question 2 clamp: truncate any oversized operand to the
        // row's own width before combining, rather than trusting upstream
        // invariants silently.
        let width = n.min(best.len()).min(worst_solution.len());

        (0..width)
            .map(|j| {
                let a = rng.random::<f64>();
                let b = rng.random::<f64>();
                current[j] + a * (best[j] - current[j].abs()) - b * (worst_solution[j] - current[j].abs())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::runner::PopulationRunner;
    use crate::population::PopulationConfig;

    #[test]
    fn jaya_runner_finds_a_feasible_packing() {
        let items = vec![9, 8, 7, 6, 5, 4, 3, 2, 1];
        let capacity = 10;
        let tm = crate::primitives::lower_bound(&items, capacity);
        let rule = JayaUpdateRule::default();
        let config = PopulationConfig::default()
            .with_population_size(6)
            .with_max_iterations(15)
            .with_seed(21);
        let result = PopulationRunner::run(&items, capacity, tm, &rule, &config);
        assert!(result.packing.respects_capacity(capacity));
        assert!(result.packing.conserves_mass(&items));
    }

    #[test]
    fn update_row_never_exceeds_predecessor_width() {
        let items = vec![5, 5, 5, 5];
        let capacity = 10;
        let rule = JayaUpdateRule::default();
        let config = PopulationConfig::default().with_population_size(3).with_seed(3);
        // Exercised indirectly through the runner: if width clamping were
        // wrong, repair would receive a mismatched-length candidate.
        let result =
            PopulationRunner::run(&items, capacity, crate::primitives::lower_bound(&items, capacity), &rule, &config);
        assert!(result.packing.conserves_mass(&items));
    }
}
