//! Consistent Neighborhood Search (spec §4.9).
//!
//! Grounded directly in `original_source/.../cns.py`'s
//! `consistent_neighborhood_search`/`__operations`/`__tabucns`/
//! `__find_best_move`/`__initialize_containers` — the fullest and most
//! literal port in the crate, since the original is unambiguous and
//! complete here.
//!
//! The "unplaced" reservoir is tracked as a flat item multiset rather
//! than a sequence of bins: nothing downstream distinguishes which
//! original bin an unplaced item came from, so the simplification changes
//! no observable behavior while sparing an extra layer of bin bookkeeping.

use std::time::Instant;

use rand::Rng;

use crate::packing::{best_fit_decreasing, Bin, Packing};
use crate::primitives::{continue_search, sorted_merge};
use crate::random::{create_rng, create_unseeded_rng};
use crate::tabu::CnsTabu;

use super::descent::{DescentConfig, DescentRunner};

#[derive(Debug, Clone)]
pub struct CnsConfig {
    /// Consecutive inner rounds without shrinking the reservoir before the
    /// current bin-count target is abandoned.
    pub outer_max_attempts: usize,
    /// Iteration cap for the TabuCNS move-search phase within one round.
    pub tabu_iterations: usize,
    /// Per-round time cap for the TabuCNS move-search phase.
    pub tabu_time_budget: Option<f64>,
    pub time_budget: Option<f64>,
    pub iteration_budget: Option<usize>,
    pub descent: DescentConfig,
    pub seed: Option<u64>,
}

impl Default for CnsConfig {
    fn default() -> Self {
        Self {
            outer_max_attempts: 20,
            tabu_iterations: 200,
            tabu_time_budget: None,
            time_budget: None,
            iteration_budget: None,
            descent: DescentConfig::default(),
            seed: None,
        }
    }
}

impl CnsConfig {
    pub fn with_outer_max_attempts(mut self, n: usize) -> Self {
        self.outer_max_attempts = n;
        self
    }

    pub fn with_tabu_iterations(mut self, n: usize) -> Self {
        self.tabu_iterations = n;
        self
    }

    pub fn with_tabu_time_budget(mut self, secs: f64) -> Self {
        self.tabu_time_budget = Some(secs);
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

    pub fn with_descent(mut self, descent: DescentConfig) -> Self {
        self.descent = descent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CnsResult {
    pub packing: Packing,
    pub fitness: usize,
    pub outer_rounds: usize,
}

/// The best feasible, non-tabu `(bin index in partial, item removed from
/// that bin, index of item taken from the reservoir)` move, maximizing
/// the load change on the chosen bin. Ties resolve to the first move
/// found in scan order.
fn find_best_move(partial: &[Bin], unplaced: &[u64], capacity: u64, tabu: &CnsTabu) -> Option<(usize, u64, usize)> {
    let mut best: Option<(usize, u64, usize, i64)> = None;

    for (a_idx, bin) in partial.iter().enumerate() {
        let identity = bin.items().to_vec();
        let load = bin.load();
        for &s in bin.items() {
            if tabu.is_tabu(s, &identity) {
                continue;
            }
            for (t_idx, &t) in unplaced.iter().enumerate() {
                let new_load = load as i64 - s as i64 + t as i64;
                if new_load < 0 || new_load as u64 > capacity {
                    continue;
                }
                let delta = t as i64 - s as i64;
                let better = match &best {
                    Some((.., best_delta)) => delta > *best_delta,
                    None => true,
                };
                if better {
                    best = Some((a_idx, s, t_idx, delta));
                }
            }
        }
    }

    best.map(|(a_idx, s, t_idx, _)| (a_idx, s, t_idx))
}

/// Repeatedly applies the best feasible non-tabu move until none remains,
/// the iteration cap is hit, or the per-phase time budget expires.
fn tabu_phase(partial: &mut [Bin], unplaced: &mut Vec<u64>, capacity: u64, tabu: &mut CnsTabu, config: &CnsConfig) {
    let phase_start = Instant::now();

    for _ in 0..config.tabu_iterations {
        if let Some(budget) = config.tabu_time_budget {
            if phase_start.elapsed().as_secs_f64() >= budget {
                break;
            }
        }

        let current_objective: u64 = partial.iter().map(Bin::load).sum();
        let Some((a_idx, s, t_idx)) = find_best_move(partial, unplaced, capacity, tabu) else {
            break;
        };

        let identity_before = partial[a_idx].items().to_vec();
        let t_item = unplaced.remove(t_idx);

        let mut items = partial[a_idx].items().to_vec();
        let pos = items.iter().position(|&v| v == s).expect("s came from this bin");
        items.remove(pos);
        let items = sorted_merge(&items, &[t_item]);
        partial[a_idx] = Bin::from_sorted(items);
        unplaced.push(s);

        let new_objective: u64 = partial.iter().map(Bin::load).sum();
        if new_objective > current_objective {
            tabu.clear();
        } else {
            tabu.bump(s, &identity_before);
        }
        tabu.decay();
    }
}

pub struct CnsRunner;

impl CnsRunner {
    /// Seeds from Best-Fit-Decreasing and repeatedly tries to shrink the
    /// bin count by one, re-packing the dismantled tail back into the
    /// remaining bins via alternating TabuCNS and Descent phases.
    ///
    /// Terminates immediately if the BFD seed is already at or below
    /// `target`.
    pub fn run(items: &[u64], capacity: u64, target: usize, config: &CnsConfig) -> CnsResult {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_unseeded_rng(),
        };

        let mut bins = best_fit_decreasing(items, capacity);
        let t_start = Instant::now();
        let mut outer_rounds = 0usize;

        if bins.len() <= target || bins.len() <= 1 {
            let fitness = bins.len();
            return CnsResult { packing: Packing::new(bins), fitness, outer_rounds };
        }

        loop {
            outer_rounds += 1;
            let num_bins = bins.len() - 1;
            if num_bins == 0 {
                break;
            }

            let mut partial: Vec<Bin> = bins[..num_bins].to_vec();
            let mut unplaced: Vec<u64> =
                bins[num_bins..].iter().flat_map(|b| b.items().to_vec()).collect();

            let mut tabu = CnsTabu::new();
            let mut rounds_without_progress = 0usize;

            loop {
                let before_len = unplaced.len();
                tabu_phase(&mut partial, &mut unplaced, capacity, &mut tabu, config);

                let descent_result =
                    DescentRunner::run(partial.clone(), unplaced.clone(), capacity, &config.descent, &mut rng);
                partial = descent_result.bins;
                unplaced = descent_result.unplaced;

                if unplaced.is_empty() {
                    break;
                }
                if unplaced.len() >= before_len {
                    rounds_without_progress += 1;
                } else {
                    rounds_without_progress = 0;
                }
                if rounds_without_progress >= config.outer_max_attempts {
                    break;
                }
                if let Some(budget) = config.time_budget {
                    if t_start.elapsed().as_secs_f64() >= budget {
                        break;
                    }
                }
            }

            if unplaced.is_empty() && partial.len() < bins.len() {
                bins = partial;
            } else {
                break;
            }

            let now = Instant::now();
            if !continue_search(target, bins.len(), config.time_budget, t_start, now, config.iteration_budget, outer_rounds) {
                break;
            }
        }

        let fitness = bins.len();
        CnsResult { packing: Packing::new(bins), fitness, outer_rounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminates_immediately_when_already_at_target() {
        let items = [5, 5, 5, 5];
        let result = CnsRunner::run(&items, 10, 2, &CnsConfig::default());
        assert_eq!(result.fitness, 2);
        assert_eq!(result.outer_rounds, 0);
    }

    #[test]
    fn run_never_regresses_below_theoretical_minimum() {
        let items = [8, 7, 6, 5, 4, 3, 2, 1];
        let tm = crate::primitives::lower_bound(&items, 10);
        let config = CnsConfig::default().with_seed(5).with_outer_max_attempts(5);
        let result = CnsRunner::run(&items, 10, tm, &config);
        assert!(result.fitness >= tm);
        assert!(result.packing.respects_capacity(10));
        assert!(result.packing.conserves_mass(&items));
    }

    #[test]
    fn result_conserves_mass_across_random_instance() {
        let items = [9, 8, 7, 6, 5, 4, 3, 2, 1, 1, 1, 1];
        let capacity = 10;
        let tm = crate::primitives::lower_bound(&items, capacity);
        let config = CnsConfig::default().with_seed(42).with_outer_max_attempts(10);
        let result = CnsRunner::run(&items, capacity, tm, &config);
        assert!(result.packing.conserves_mass(&items));
        assert!(result.packing.respects_capacity(capacity));
    }

    #[test]
    fn find_best_move_respects_capacity_and_tabu() {
        let partial = vec![Bin::new(vec![4, 4])];
        let unplaced = vec![1, 9];
        let tabu = CnsTabu::new();
        let mv = find_best_move(&partial, &unplaced, 10, &tabu);
        // Swapping out a 4 for the 9 would overflow (4+9-4=9 fits actually: load=8,
        // remove 4 -> 4, add 9 -> 13 > 10, infeasible); swapping for 1 keeps load at 5.
        assert!(mv.is_some());
        let (a_idx, s, t_idx) = mv.unwrap();
        assert_eq!(a_idx, 0);
        assert_eq!(s, 4);
        assert_eq!(unplaced[t_idx], 1);
    }
}
