//! Population-wide Simulated Annealing flavor (spec §4.2, §1).
//!
//! `original_source/binpacksolver/heuristic/sa.py`'s
//! `simulated_annealing_bpp` perturbs a single container solution and
//! accepts the perturbation by a Metropolis criterion. This flavor
//! applies that acceptance rule per-row over the shared matrix skeleton:
//! each row's candidate is a random two-position swap of its own genome
//! (the genome-level analogue of the original's single item relocation
//! between bins). The Metropolis test runs inside `update_row` itself —
//! the only point with access to both the predecessor's fitness and a
//! trial fitness for the perturbation — and a rejected perturbation
//! returns the predecessor genome unchanged, which Repair then passes
//! straight through as an identity permutation.
//!
//! Anneal state (the temperature) lives in the rule instance behind a
//! `Mutex`, cooled once per row update by the configured
//! [`CoolingSchedule`], mirroring `u-metaheur`'s `sa::config::CoolingSchedule`.

use std::sync::Mutex;

use rand::{Rng, RngCore};

use crate::encoding::valid_sweep;

use super::super::{PopulationContext, PopulationUpdateRule};

/// Cooling schedule for the population-wide Metropolis acceptance test.
///
/// Mirrors `u-metaheur`'s `sa::config::CoolingSchedule` shape, narrowed to
/// the one variant this flavor needs by default.
#[derive(Debug, Clone, Copy)]
pub enum CoolingSchedule {
    /// `T_{k+1} = alpha * T_k`.
    Geometric { alpha: f64 },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

#[derive(Debug, Clone)]
pub struct SaPopulationConfig {
    pub initial_temperature: f64,
    pub min_temperature: f64,
    pub cooling: CoolingSchedule,
}

impl Default for SaPopulationConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            min_temperature: 1e-3,
            cooling: CoolingSchedule::default(),
        }
    }
}

impl SaPopulationConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }
}

pub struct SaUpdateRule {
    config: SaPopulationConfig,
    temperature: Mutex<f64>,
}

impl SaUpdateRule {
    pub fn new(config: SaPopulationConfig) -> Self {
        let temperature = Mutex::new(config.initial_temperature);
        Self { config, temperature }
    }
}

impl Default for SaUpdateRule {
    fn default() -> Self {
        Self::new(SaPopulationConfig::default())
    }
}

fn cool(current: f64, schedule: CoolingSchedule, floor: f64) -> f64 {
    let CoolingSchedule::Geometric { alpha } = schedule;
    (current * alpha).max(floor)
}

impl PopulationUpdateRule for SaUpdateRule {
    fn name(&self) -> &str {
        "sa"
    }

    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        let genome = &ctx.rows[row].genome;
        let n = genome.len();
        let predecessor_fitness = ctx.rows[row].fitness;

        let mut perturbed = genome.clone();
        if n >= 2 {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            perturbed.swap(i, j);
        }
        let trial_fitness = valid_sweep(&perturbed, ctx.capacity).len();

        let mut temperature = self.temperature.lock().expect("temperature lock poisoned");
        let accept = trial_fitness <= predecessor_fitness || {
            let delta = (predecessor_fitness as f64 - trial_fitness as f64) / temperature.max(self.config.min_temperature);
            rng.random::<f64>() < delta.exp()
        };
        *temperature = cool(*temperature, self.config.cooling, self.config.min_temperature);

        let chosen = if accept { &perturbed } else { genome };
        chosen.iter().map(|&v| v as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::runner::PopulationRunner;
    use crate::population::PopulationConfig;

    #[test]
    fn sa_runner_finds_a_feasible_packing() {
        let items = vec![9, 8, 7, 6, 5, 4, 3, 2, 1];
        let capacity = 10;
        let tm = crate::primitives::lower_bound(&items, capacity);
        let rule = SaUpdateRule::default();
        let config = PopulationConfig::default()
            .with_population_size(6)
            .with_max_iterations(15)
            .with_seed(31);
        let result = PopulationRunner::run(&items, capacity, tm, &rule, &config);
        assert!(result.packing.respects_capacity(capacity));
        assert!(result.packing.conserves_mass(&items));
    }

    #[test]
    fn cooling_schedule_monotonically_decreases_and_floors() {
        let mut t = 1.0;
        for _ in 0..200 {
            t = cool(t, CoolingSchedule::Geometric { alpha: 0.9 }, 0.1);
        }
        assert!((t - 0.1).abs() < 1e-9);
    }

    #[test]
    fn rejected_perturbation_returns_predecessor_unchanged() {
        // A temperature of effectively zero makes worsening moves
        // vanishingly unlikely to be accepted; a single-item genome can
        // never produce a worsening swap (n < 2), so this exercises the
        // pass-through path deterministically.
        let rule = SaUpdateRule::new(SaPopulationConfig::default().with_initial_temperature(1e-9));
        let ctx = PopulationContext {
            capacity: 10,
            item_min: 5,
            item_max: 5,
            rows: vec![crate::population::generator::PopulationRow { genome: vec![5], fitness: 1 }],
            personal_best: vec![crate::population::generator::PopulationRow { genome: vec![5], fitness: 1 }],
            global_best: crate::population::generator::PopulationRow { genome: vec![5], fitness: 1 },
            iteration: 0,
        };
        let mut rng = crate::random::create_rng(1);
        let candidate = rule.update_row(&ctx, 0, &mut rng);
        assert_eq!(candidate, vec![5.0]);
    }
}
