//! The driver (spec §4.10, §6): schedules a priority-ordered list of
//! heuristics over a shared time budget, sequentially or in parallel,
//! propagating the incumbent genome forward between runs.
//!
//! Grounded in `original_source/binpacksolver/solver.py`'s `solver_bpp`:
//! a fixed heuristic roster, a `heu_param` dict of per-heuristic knobs,
//! and a loop that feeds each heuristic's output forward as the next
//! heuristic's seed. The worker-pool half is grounded in `u-metaheur`'s
//! `ga::runner`/`brkga::runner` use of `rayon` for data-parallel
//! evaluation, generalized here to whole heuristic runs and kept behind
//! its own `parallel` feature flag rather than imported
//! unconditionally.

pub mod config;
pub mod report;

use std::fmt;
use std::sync::Mutex;
use std::time::Instant;

pub use config::SolveOptions;
pub use report::{HeuristicRunReport, SolveReport};

use crate::encoding::{genome_to_packing, GenerationMode};
use crate::error::BppError;
use crate::instance::Instance;
use crate::packing::Packing;
use crate::population::flavors::{abc, ga_cgt, jaya, pso, sa};
use crate::population::{PopulationConfig, PopulationRunner};
use crate::search::bin_tabu::{BinTabuConfig, BinTabuRunner};
use crate::search::cns::{CnsConfig, CnsRunner};

/// One entry in the driver's priority list (spec §1's roster, §4.10's
/// "priority-ordered list of heuristics").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    BinTabu,
    Cns,
    Pso,
    Jaya,
    GaCgt,
    Sa,
    Abc,
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeuristicKind::BinTabu => "bin_tabu",
            HeuristicKind::Cns => "cns",
            HeuristicKind::Pso => "pso",
            HeuristicKind::Jaya => "jaya",
            HeuristicKind::GaCgt => "ga_cgt",
            HeuristicKind::Sa => "sa",
            HeuristicKind::Abc => "abc",
        };
        write!(f, "{name}")
    }
}

impl HeuristicKind {
    /// The default priority order (`original_source`'s `solver_bpp`
    /// default heuristic list): cheapest/most-reliable local moves first,
    /// the heavier population metaheuristics last.
    pub fn default_priority() -> Vec<HeuristicKind> {
        vec![
            HeuristicKind::Cns,
            HeuristicKind::BinTabu,
            HeuristicKind::GaCgt,
            HeuristicKind::Sa,
            HeuristicKind::Abc,
            HeuristicKind::Pso,
            HeuristicKind::Jaya,
        ]
    }
}

/// Runs one heuristic to completion against `seed` and returns its
/// resulting genome (flattened packing) and fitness.
fn run_heuristic(
    kind: HeuristicKind,
    seed: &[u64],
    capacity: u64,
    target: usize,
    time_budget: Option<f64>,
    seed_rng: Option<u64>,
) -> (Vec<u64>, usize) {
    match kind {
        HeuristicKind::BinTabu => {
            let packing = genome_to_packing(seed, capacity, GenerationMode::Valid);
            let mut config = BinTabuConfig::default();
            if let Some(t) = time_budget {
                config = config.with_time_budget(t);
            }
            if let Some(s) = seed_rng {
                config = config.with_seed(s);
            }
            let result = BinTabuRunner::run(packing, capacity, target, &config);
            (result.packing.flatten(), result.fitness)
        }
        HeuristicKind::Cns => {
            let mut config = CnsConfig::default();
            if let Some(t) = time_budget {
                config = config.with_time_budget(t);
            }
            if let Some(s) = seed_rng {
                config = config.with_seed(s);
            }
            let result = CnsRunner::run(seed, capacity, target, &config);
            (result.packing.flatten(), result.fitness)
        }
        HeuristicKind::Pso => run_population(pso::PsoUpdateRule::default(), seed, capacity, target, time_budget, seed_rng),
        HeuristicKind::Jaya => {
            run_population(jaya::JayaUpdateRule::default(), seed, capacity, target, time_budget, seed_rng)
        }
        HeuristicKind::GaCgt => {
            run_population(ga_cgt::GaCgtUpdateRule::default(), seed, capacity, target, time_budget, seed_rng)
        }
        HeuristicKind::Sa => run_population(sa::SaUpdateRule::default(), seed, capacity, target, time_budget, seed_rng),
        HeuristicKind::Abc => run_population(abc::AbcUpdateRule::default(), seed, capacity, target, time_budget, seed_rng),
    }
}

fn run_population<R: crate::population::PopulationUpdateRule>(
    rule: R,
    seed: &[u64],
    capacity: u64,
    target: usize,
    time_budget: Option<f64>,
    seed_rng: Option<u64>,
) -> (Vec<u64>, usize) {
    let mut config = PopulationConfig::default();
    if let Some(t) = time_budget {
        config = config.with_time_budget(t);
    }
    if let Some(s) = seed_rng {
        config = config.with_seed(s);
    }
    let result = PopulationRunner::run(seed, capacity, target, &rule, &config);
    (result.packing.flatten(), result.fitness)
}

/// Per-heuristic time shares for `n` heuristics run sequentially
/// (`max_workers == 1`), spec §4.10: "a descending linear weighting,
/// first heuristic gets the largest share."
///
/// The literal `(i+1)/sum` formula given for 1-indexed position
/// increases with position, the opposite of "first gets the largest
/// share" under a 0-indexed reading; this resolves the contradiction in
/// favor of the stated intent: `weight_i = (n - i) / (n*(n+1)/2)` for
/// 0-indexed `i`, so position 0 receives the largest share and the
/// weights still sum to 1 (see DESIGN.md).
fn sequential_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let denom = (n * (n + 1) / 2) as f64;
    (0..n).map(|i| (n - i) as f64 / denom).collect()
}

/// Per-heuristic time shares when `max_workers > 1`: the first
/// `max_workers` heuristics (the ones that can run concurrently in the
/// first wave) split 70% of the budget evenly; the remainder split the
/// other 30% with ascending weights, since they queue behind the first
/// wave and have progressively less to prove.
fn parallel_weights(n: usize, max_workers: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let first_wave = max_workers.min(n);
    let rest = n - first_wave;

    let mut weights = vec![0.0; n];
    if first_wave > 0 {
        let share = 0.7 / first_wave as f64;
        for w in weights.iter_mut().take(first_wave) {
            *w = share;
        }
    }
    if rest > 0 {
        let denom = (rest * (rest + 1) / 2) as f64;
        for (offset, w) in weights.iter_mut().skip(first_wave).enumerate() {
            *w = 0.3 * (offset + 1) as f64 / denom;
        }
    }
    weights
}

fn time_shares(n: usize, options: &SolveOptions) -> Vec<Option<f64>> {
    let Some(time_max) = options.time_max else {
        return vec![None; n];
    };
    if options.disable_allocation {
        return vec![Some(time_max); n];
    }
    let weights = if options.max_workers <= 1 {
        sequential_weights(n)
    } else {
        parallel_weights(n, options.max_workers)
    };
    weights.into_iter().map(|w| Some(w * time_max)).collect()
}

fn sequential_solve(instance: &Instance, heuristics: &[HeuristicKind], options: &SolveOptions) -> SolveReport {
    let shares = time_shares(heuristics.len(), options);
    let mut current_seed = instance.items().to_vec();
    let mut best_genome = instance.items().to_vec();
    let mut best_fitness = usize::MAX;
    let tm = instance.lower_bound();
    let mut reports = Vec::with_capacity(heuristics.len());

    for (i, &kind) in heuristics.iter().enumerate() {
        let t0 = Instant::now();
        let (genome, fitness) =
            run_heuristic(kind, &current_seed, instance.capacity(), tm, shares[i], options.seed.map(|s| s + i as u64));
        let elapsed = t0.elapsed().as_secs_f64();

        if fitness <= best_fitness {
            best_fitness = fitness;
            best_genome = genome.clone();
            current_seed = genome;
        }

        reports.push(HeuristicRunReport {
            name: kind.to_string(),
            instance_size: instance.items().len(),
            capacity: instance.capacity(),
            best_fit: fitness,
            theoretical_minimum: tm,
            elapsed,
        });
    }

    let packing = genome_to_packing(&best_genome, instance.capacity(), GenerationMode::Valid);
    SolveReport { bin_count: packing.fitness(), packing, reports }
}

#[cfg(feature = "parallel")]
fn parallel_solve(instance: &Instance, heuristics: &[HeuristicKind], options: &SolveOptions) -> SolveReport {
    use rayon::prelude::*;

    let shares = time_shares(heuristics.len(), options);
    let tm = instance.lower_bound();
    let incumbent: Mutex<(Vec<u64>, usize)> = Mutex::new((instance.items().to_vec(), usize::MAX));

    // Spec §4.10: only the first `max_workers` heuristics run concurrently;
    // the rest queue and refill as a slot frees up. `parallel_weights`
    // already budgets time on that assumption, so the pool's thread count
    // must match `max_workers`, not rayon's default (CPU count).
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.max_workers)
        .build()
        .expect("failed to build the driver's worker pool");

    let reports: Vec<HeuristicRunReport> = pool.install(|| {
        heuristics
            .par_iter()
            .enumerate()
            .map(|(i, &kind)| {
                let seed_genome = incumbent.lock().expect("incumbent lock poisoned").0.clone();
                let t0 = Instant::now();
                let (genome, fitness) = run_heuristic(
                    kind,
                    &seed_genome,
                    instance.capacity(),
                    tm,
                    shares[i],
                    options.seed.map(|s| s + i as u64),
                );
                let elapsed = t0.elapsed().as_secs_f64();

                let mut guard = incumbent.lock().expect("incumbent lock poisoned");
                if fitness < guard.1 {
                    *guard = (genome, fitness);
                }

                HeuristicRunReport {
                    name: kind.to_string(),
                    instance_size: instance.items().len(),
                    capacity: instance.capacity(),
                    best_fit: fitness,
                    theoretical_minimum: tm,
                    elapsed,
                }
            })
            .collect()
    });

    let (best_genome, _) = incumbent.into_inner().expect("incumbent lock poisoned");
    let packing = genome_to_packing(&best_genome, instance.capacity(), GenerationMode::Valid);
    SolveReport { bin_count: packing.fitness(), packing, reports }
}

/// Runs the configured heuristics over `instance` and returns the best
/// packing found along with a per-heuristic progress report.
///
/// Sequential mode (`max_workers == 1`, the default) threads the
/// incumbent genome forward between heuristics, each one seeded from the
/// previous winner. Parallel mode (behind the `parallel` feature) runs
/// the priority list across a `rayon` pool, each worker reading the
/// shared incumbent at dispatch time and updating it monotonically on
/// completion — ties keep the earlier winner.
pub fn solve(instance: &Instance, options: &SolveOptions) -> Result<SolveReport, BppError> {
    let heuristics = options.heuristics();

    #[cfg(feature = "parallel")]
    let report = if options.max_workers > 1 {
        parallel_solve(instance, &heuristics, options)
    } else {
        sequential_solve(instance, &heuristics, options)
    };

    #[cfg(not(feature = "parallel"))]
    let report = sequential_solve(instance, &heuristics, options);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_weights_sum_to_one_and_descend() {
        let w = sequential_weights(4);
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for pair in w.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn sequential_weights_empty_is_empty() {
        assert!(sequential_weights(0).is_empty());
    }

    #[test]
    fn parallel_weights_sum_to_one() {
        let w = parallel_weights(5, 2);
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn solve_produces_a_feasible_packing() {
        let instance = Instance::new(vec![8, 7, 6, 5, 4, 3, 2, 1], 10).unwrap();
        let options = SolveOptions::default()
            .with_time_max(0.2)
            .with_priority_func(vec![HeuristicKind::Cns, HeuristicKind::BinTabu])
            .with_seed(7);
        let report = solve(&instance, &options).unwrap();
        assert!(report.packing.respects_capacity(10));
        assert!(report.packing.conserves_mass(instance.items()));
        assert_eq!(report.reports.len(), 2);
    }

    #[test]
    fn solve_respects_disable_allocation() {
        let instance = Instance::new(vec![5, 5, 5, 5], 10).unwrap();
        let options = SolveOptions::default()
            .with_time_max(0.1)
            .with_disable_allocation(true)
            .with_priority_func(vec![HeuristicKind::BinTabu])
            .with_seed(3);
        let report = solve(&instance, &options).unwrap();
        assert!(report.packing.respects_capacity(10));
    }
}
