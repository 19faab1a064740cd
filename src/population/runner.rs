//! The shared population-metaheuristic loop (spec §4.2).
//!
//! The direct analogue of `u-metaheur`'s `TabuRunner::run`/`SaRunner::run`
//! shape: a bare struct with one associated `run` function taking a
//! `&dyn` trait object and a config.

use std::time::Instant;

use crate::encoding::{genome_to_packing, GenerationMode};
use crate::packing::Packing;
use crate::primitives::{continue_search, fitness_of};
use crate::random::{create_rng, create_unseeded_rng};
use crate::repair::repair;

use super::generator::{generate_initial_matrix_population, PopulationRow};
use super::{PopulationConfig, PopulationContext, PopulationUpdateRule};

/// Result of a population-metaheuristic run.
#[derive(Debug, Clone)]
pub struct PopulationResult {
    pub packing: Packing,
    pub fitness: usize,
    pub iterations: usize,
}

pub struct PopulationRunner;

impl PopulationRunner {
    /// Runs `rule`'s population skeleton to completion.
    ///
    /// 1. Seeds the population matrix via [`generate_initial_matrix_population`].
    /// 2. Each iteration, every row's candidate (from `rule.update_row`) is
    ///    clipped to `[min(items), max(items)]`, rounded to integers, run
    ///    through `rule.local_search`, then [`repair`]ed against its
    ///    predecessor row so population-wide multiset identity holds.
    /// 3. Personal and global bests are tracked; ties keep the
    ///    earlier-found row.
    /// 4. On exit the global-best genome is decoded to a `Packing` via the
    ///    VALID sweep.
    pub fn run(
        items: &[u64],
        capacity: u64,
        target: usize,
        rule: &dyn PopulationUpdateRule,
        config: &PopulationConfig,
    ) -> PopulationResult {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_unseeded_rng(),
        };

        let item_min = *items.iter().min().expect("non-empty items");
        let item_max = *items.iter().max().expect("non-empty items");

        let rows = generate_initial_matrix_population(
            items,
            capacity,
            config.population_size,
            config.juice,
            config.generation_mode,
            &mut rng,
        );

        let global_best = rows
            .iter()
            .cloned()
            .min_by_key(|row| row.fitness)
            .expect("population_size > 0");
        let personal_best = rows.clone();

        let mut ctx = PopulationContext {
            capacity,
            item_min,
            item_max,
            rows,
            personal_best,
            global_best,
            iteration: 0,
        };

        let t_start = Instant::now();
        let mut it = 0usize;

        while continue_search(
            target,
            ctx.global_best.fitness,
            config.time_budget,
            t_start,
            Instant::now(),
            Some(config.max_iterations),
            it,
        ) {
            for row in 0..ctx.rows.len() {
                let candidate_f = rule.update_row(&ctx, row, &mut rng);
                let mut candidate: Vec<u64> = candidate_f
                    .iter()
                    .map(|&v| v.round().clamp(item_min as f64, item_max as f64) as u64)
                    .collect();

                rule.local_search(&mut candidate, capacity, &mut rng);

                let predecessor = &ctx.rows[row].genome;
                let repaired = repair(predecessor, &candidate, capacity, &mut rng);
                let fitness = fitness_of(&repaired, capacity);

                if fitness < ctx.personal_best[row].fitness {
                    ctx.personal_best[row] = PopulationRow { genome: repaired.clone(), fitness };
                }
                if fitness < ctx.global_best.fitness {
                    ctx.global_best = PopulationRow { genome: repaired.clone(), fitness };
                }

                ctx.rows[row] = PopulationRow { genome: repaired, fitness };
            }

            it += 1;
            ctx.iteration = it;
        }

        let packing = genome_to_packing(&ctx.global_best.genome, capacity, GenerationMode::Valid);
        let fitness = ctx.global_best.fitness;
        PopulationResult { packing, fitness, iterations: it }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::flavors::pso::{PsoConfig, PsoUpdateRule};

    #[test]
    fn run_produces_a_feasible_packing() {
        let items = vec![8, 7, 6, 5, 4, 3, 2, 1];
        let capacity = 10;
        let tm = crate::primitives::lower_bound(&items, capacity);
        let rule = PsoUpdateRule::new(PsoConfig::default());
        let config = PopulationConfig::default()
            .with_population_size(8)
            .with_max_iterations(20)
            .with_seed(99);
        let result = PopulationRunner::run(&items, capacity, tm, &rule, &config);
        assert!(result.packing.respects_capacity(capacity));
        assert!(result.packing.conserves_mass(&items));
        assert_eq!(result.fitness, result.packing.fitness());
    }

    #[test]
    fn run_terminates_immediately_when_target_already_met() {
        let items = vec![5, 5, 5, 5];
        let capacity = 10;
        let rule = PsoUpdateRule::new(PsoConfig::default());
        let config = PopulationConfig::default().with_population_size(4).with_seed(1);
        // Target of 4 is trivially satisfied by any legal packing.
        let result = PopulationRunner::run(&items, capacity, 4, &rule, &config);
        assert_eq!(result.iterations, 0);
    }
}
