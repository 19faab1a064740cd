//! Shared population-metaheuristic configuration (spec §4.2, §4.5).

use crate::encoding::GenerationMode;

/// Configuration shared by every [`super::PopulationUpdateRule`] flavor,
/// in `u-metaheur`'s builder style (`with_*` methods over a `Default`).
#[derive(Debug, Clone)]
pub struct PopulationConfig {
    /// Population size `P` (spec §3: "a P x (N+1) population matrix").
    pub population_size: usize,
    /// Generation mode used to seed the initial population (spec §4.5).
    pub generation_mode: GenerationMode,
    /// Whether the last seeded row is forced onto Best-Fit-Decreasing.
    pub juice: bool,
    pub max_iterations: usize,
    pub time_budget: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generation_mode: GenerationMode::Valid,
            juice: true,
            max_iterations: 500,
            time_budget: None,
            seed: None,
        }
    }
}

impl PopulationConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generation_mode(mut self, mode: GenerationMode) -> Self {
        self.generation_mode = mode;
        self
    }

    pub fn with_juice(mut self, juice: bool) -> Self {
        self.juice = juice;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_budget(mut self, secs: f64) -> Self {
        self.time_budget = Some(secs);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
