//! Population metaheuristics sharing one update-rule interface (spec §4.2).
//!
//! Every swarm/evolutionary flavor in this family — PSO, Jaya, GA-CGT,
//! a population-wide Simulated Annealing variant, ABC, and the rest spec
//! §1 names — conforms to one fixed skeleton and differs only in its
//! numeric update rule and local-search hook. Rather than a
//! `PopulationProblem`-style trait (one method per lifecycle step, as
//! `u-metaheur`'s `ga`/`tabu` families use), this is modeled with exactly
//! the two customization points the skeleton actually varies:
//! [`PopulationUpdateRule::update_row`] and
//! [`PopulationUpdateRule::local_search`]. [`runner::PopulationRunner`]
//! owns the shared loop, the direct analogue of `u-metaheur`'s
//! `TabuRunner`/`SaRunner::run` shape generalized to a population.

pub mod config;
pub mod flavors;
pub mod generator;
pub mod runner;

pub use config::PopulationConfig;
pub use generator::{generate_initial_matrix_population, PopulationRow};
pub use runner::{PopulationResult, PopulationRunner};

use rand::RngCore;

/// A flat item-sequence encoding.
pub type Genome = Vec<u64>;

/// Everything a flavor's update rule needs to read about the current
/// population state: the capacity, each item's value range (for
/// clipping candidate rows), the current rows, their personal bests, the
/// global best, and the current iteration count.
pub struct PopulationContext {
    pub capacity: u64,
    pub item_min: u64,
    pub item_max: u64,
    pub rows: Vec<PopulationRow>,
    pub personal_best: Vec<PopulationRow>,
    pub global_best: PopulationRow,
    pub iteration: usize,
}

impl PopulationContext {
    /// The row index currently holding the worst (largest) fitness.
    ///
    /// Several flavors (Jaya among them) move candidates away from the
    /// worst row as well as toward the best.
    pub fn worst_row_index(&self) -> usize {
        self.rows
            .iter()
            .enumerate()
            .max_by_key(|(_, r)| r.fitness)
            .map(|(i, _)| i)
            .expect("population is non-empty")
    }
}

/// The two customization points every population flavor supplies; the
/// surrounding seed/iterate/repair/track-bests/decode skeleton is shared
/// and lives in [`runner::PopulationRunner`].
pub trait PopulationUpdateRule: Send + Sync {
    /// A short identifier for this flavor, used in progress reporting.
    fn name(&self) -> &str;

    /// Produces a candidate row (as real-valued positions, before
    /// clipping, rounding, and Repair) for `row` given the current
    /// population context.
    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64>;

    /// An optional flavor-specific refinement applied to the repaired
    /// candidate genome before its fitness is finalized. The default is
    /// a no-op; flavors without a local-search step (PSO, Jaya) leave it
    /// unimplemented.
    fn local_search(&self, _genome: &mut Genome, _capacity: u64, _rng: &mut dyn RngCore) {}
}
