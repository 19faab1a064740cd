//! Bin-level tabu search (spec §4.7).
//!
//! Grounded in `original_source/binpacksolver/heuristic/tabusearch.py`'s
//! general shape (sample a non-tabu bin pair, apply the composite
//! `insert` move, track `K`) combined with `u-metaheur`'s
//! `tabu::runner::TabuRunner` loop structure: a config struct, a result
//! struct, and a bare runner with one associated `run` function.

use std::time::Instant;

use rand::Rng;

use crate::container;
use crate::packing::Packing;
use crate::primitives::continue_search;
use crate::random::{create_rng, create_unseeded_rng};
use crate::tabu::MoveIndexTabu;

/// Configuration for the bin-level tabu search.
#[derive(Debug, Clone)]
pub struct BinTabuConfig {
    /// Denominator floor for the move-index tabu list's size (spec: "sized
    /// `K / max(alpha, K-1)`").
    pub alpha: usize,
    pub time_budget: Option<f64>,
    pub iteration_budget: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for BinTabuConfig {
    fn default() -> Self {
        Self {
            alpha: 4,
            time_budget: None,
            iteration_budget: None,
            seed: None,
        }
    }
}

impl BinTabuConfig {
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_time_budget(mut self, secs: f64) -> Self {
        self.time_budget = Some(secs);
        self
    }

    pub fn with_iteration_budget(mut self, n: usize) -> Self {
        self.iteration_budget = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of a bin-level tabu search run.
#[derive(Debug, Clone)]
pub struct BinTabuResult {
    pub packing: Packing,
    pub fitness: usize,
    pub iterations: usize,
}

/// `K / max(alpha, K-1)`, floored at 1 so the tabu list is never degenerate.
fn tabu_capacity(k: usize, alpha: usize) -> usize {
    let denom = alpha.max(k.saturating_sub(1)).max(1);
    (k / denom).max(1)
}

pub struct BinTabuRunner;

impl BinTabuRunner {
    /// Runs the bin-level tabu search to completion (termination predicate
    /// or a single bin remaining, whichever comes first).
    ///
    /// Fitness is monotone non-increasing: `insert` either merges two bins
    /// (strictly reducing `K`) or leaves the bin count unchanged.
    pub fn run(initial: Packing, capacity: u64, target: usize, config: &BinTabuConfig) -> BinTabuResult {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_unseeded_rng(),
        };

        let mut bins = initial.into_bins();
        let t_start = Instant::now();
        let mut it = 0usize;
        // Bin indices are positional: a merge shifts every later index down
        // by one, so the tabu list is rebuilt (and resized per spec's
        // K-dependent formula) whenever the bin count changes.
        let mut tabu = MoveIndexTabu::new(tabu_capacity(bins.len(), config.alpha));

        while bins.len() > 1 {
            let k = bins.len();
            let attempts_cap = k.saturating_mul(k).max(1);
            let mut chosen = None;
            for _ in 0..attempts_cap {
                let x = rng.random_range(0..k);
                let y = rng.random_range(0..k);
                if x == y {
                    continue;
                }
                let (a, b) = (x.min(y), x.max(y));
                if !tabu.find((a, b)) {
                    chosen = Some((a, b));
                    break;
                }
            }
            let Some((a, b)) = chosen else {
                break;
            };

            tabu.insert((a, b));
            let merged = container::insert(&mut bins, a, b, capacity);
            it += 1;

            if merged {
                tabu = MoveIndexTabu::new(tabu_capacity(bins.len(), config.alpha));
            }

            let now = Instant::now();
            if !continue_search(target, bins.len(), config.time_budget, t_start, now, config.iteration_budget, it) {
                break;
            }
        }

        let fitness = bins.len();
        BinTabuResult { packing: Packing::new(bins), fitness, iterations: it }
    }
}
