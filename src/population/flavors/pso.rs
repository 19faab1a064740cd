//! Particle Swarm Optimization flavor (spec §4.2, §1).
//!
//! Grounded directly in `original_source/binpacksolver/heuristic/pso.py`'s
//! `particle_swarm_optimization`: the inertia/cognitive/social velocity
//! update over the matrix encoding. The velocity state is per-row mutable
//! data the flavor owns itself (the shared `&self` update-rule interface
//! has no slot for it), kept behind a `Mutex` so the type stays `Sync`.

use std::sync::Mutex;

use rand::{Rng, RngCore};

use super::super::{PopulationContext, PopulationUpdateRule};

#[derive(Debug, Clone)]
pub struct PsoConfig {
    /// Inertia weight.
    pub inertia: f64,
    /// Cognitive (personal-best) learning factor.
    pub cognitive: f64,
    /// Social (global-best) learning factor.
    pub social: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self { inertia: 0.5, cognitive: 1.5, social: 1.5 }
    }
}

pub struct PsoUpdateRule {
    config: PsoConfig,
    velocities: Mutex<Vec<Vec<f64>>>,
}

impl PsoUpdateRule {
    pub fn new(config: PsoConfig) -> Self {
        Self { config, velocities: Mutex::new(Vec::new()) }
    }
}

impl PopulationUpdateRule for PsoUpdateRule {
    fn name(&self) -> &str {
        "pso"
    }

    fn update_row(&self, ctx: &PopulationContext, row: usize, rng: &mut dyn RngCore) -> Vec<f64> {
        let n = ctx.rows[row].genome.len();
        let population_size = ctx.rows.len();

        let mut velocities = self.velocities.lock().expect("velocity lock poisoned");
        if velocities.len() != population_size {
            *velocities = (0..population_size)
                .map(|_| (0..n).map(|_| rng.random_range(ctx.item_min as f64..=ctx.item_max as f64)).collect())
                .collect();
        }

        let current: Vec<f64> = ctx.rows[row].genome.iter().map(|&v| v as f64).collect();
        let personal_best: Vec<f64> = ctx.personal_best[row].genome.iter().map(|&v| v as f64).collect();
        let global_best: Vec<f64> = ctx.global_best.genome.iter().map(|&v| v as f64).collect();
        let r1 = rng.random::<f64>();
        let r2 = rng.random::<f64>();

        let velocity = &mut velocities[row];
        for j in 0..n {
            velocity[j] = self.config.inertia * velocity[j]
                + self.config.cognitive * r1 * (personal_best[j] - current[j])
                + self.config.social * r2 * (global_best[j] - current[j]);
        }

        current.iter().zip(velocity.iter()).map(|(&c, &v)| (c + v).abs()).collect()
    }
}
