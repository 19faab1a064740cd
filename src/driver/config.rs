//! Driver configuration (spec §4.10, §6).

use super::HeuristicKind;

/// Options accepted by [`crate::solve`] (spec §6's `solve(capacity, items, options)`).
///
/// Builder-style, in `u-metaheur`'s `GaConfig`/`SaConfig` idiom: a
/// `Default` impl plus `with_*` methods.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Ordered list of heuristics to run. `None` uses [`HeuristicKind::default_priority`].
    pub priority_func: Option<Vec<HeuristicKind>>,
    /// Number of concurrently running heuristics. `1` means sequential.
    pub max_workers: usize,
    /// Global wall-clock budget in seconds shared across all heuristics.
    /// `None` means no time limit (each heuristic still honors its own
    /// iteration budget where one applies).
    pub time_max: Option<f64>,
    /// Verbosity level for the progress table; `0` suppresses it.
    pub verbose: u8,
    /// When `true`, every heuristic receives the *entire* `time_max`
    /// instead of a weighted share (spec §6's `disable_allocation`) —
    /// useful for benchmarking a single flavor in isolation.
    pub disable_allocation: bool,
    /// Base seed for the per-worker RNG streams (spec §5). `None` draws
    /// from system entropy once per worker instead.
    pub seed: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            priority_func: None,
            max_workers: 1,
            time_max: Some(5.0),
            verbose: 0,
            disable_allocation: false,
            seed: None,
        }
    }
}

impl SolveOptions {
    pub fn with_priority_func(mut self, heuristics: Vec<HeuristicKind>) -> Self {
        self.priority_func = Some(heuristics);
        self
    }

    pub fn with_max_workers(mut self, n: usize) -> Self {
        self.max_workers = n.max(1);
        self
    }

    pub fn with_time_max(mut self, secs: f64) -> Self {
        self.time_max = Some(secs);
        self
    }

    pub fn with_verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    pub fn with_disable_allocation(mut self, disable: bool) -> Self {
        self.disable_allocation = disable;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(super) fn heuristics(&self) -> Vec<HeuristicKind> {
        self.priority_func.clone().unwrap_or_else(HeuristicKind::default_priority)
    }
}
