//! Initial population generation (spec §4.5).
//!
//! Grounded in `original_source`'s `pso.py`
//! `generate_initial_matrix_population(array_base, c, population_size,
//! VALID=True)` call and spec §4.5's `juice` flag (the last row forced
//! onto Best-Fit-Decreasing instead of a random shuffle).

use rand::Rng;

use crate::encoding::{genome_to_packing, packing_to_genome, GenerationMode};
use crate::packing::{best_fit_decreasing, Bin};
use crate::primitives::fitness_of;
use crate::random::shuffle;

/// One row of the population matrix: a genome and its fitness (the last
/// of the matrix's `N+1` columns, per spec §3).
#[derive(Debug, Clone)]
pub struct PopulationRow {
    pub genome: Vec<u64>,
    pub fitness: usize,
}

/// Builds a `population_size`-row initial population.
///
/// Each row is a randomly re-shuffled copy of `items` converted via
/// `mode` into a packing and flattened back into a genome. If `juice` is
/// set, the last row instead comes straight from Best-Fit-Decreasing.
pub fn generate_initial_matrix_population<R: Rng + ?Sized>(
    items: &[u64],
    capacity: u64,
    population_size: usize,
    juice: bool,
    mode: GenerationMode,
    rng: &mut R,
) -> Vec<PopulationRow> {
    let mut rows = Vec::with_capacity(population_size);

    for i in 0..population_size {
        let genome = if juice && population_size > 0 && i == population_size - 1 {
            let bins = best_fit_decreasing(items, capacity);
            bins.into_iter().flat_map(Bin::into_items).collect()
        } else {
            let mut shuffled = items.to_vec();
            shuffle(&mut shuffled, rng);
            let packing = genome_to_packing(&shuffled, capacity, mode);
            packing_to_genome(&packing)
        };

        let fitness = fitness_of(&genome, capacity);
        rows.push(PopulationRow { genome, fitness });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn generated_rows_conserve_mass() {
        let items = vec![8, 7, 6, 5, 4, 3, 2, 1];
        let mut rng = create_rng(1);
        let rows = generate_initial_matrix_population(&items, 10, 5, false, GenerationMode::Ffd, &mut rng);
        assert_eq!(rows.len(), 5);
        for row in &rows {
            let mut sorted = row.genome.clone();
            sorted.sort_unstable();
            let mut expected = items.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn juice_forces_last_row_to_best_fit_decreasing() {
        let items = vec![6, 5, 4, 3, 2, 1];
        let mut rng = create_rng(2);
        let rows = generate_initial_matrix_population(&items, 10, 3, true, GenerationMode::Valid, &mut rng);
        let expected_bins = best_fit_decreasing(&items, 10);
        let expected_genome: Vec<u64> = expected_bins.into_iter().flat_map(Bin::into_items).collect();
        assert_eq!(rows.last().unwrap().genome, expected_genome);
    }

    #[test]
    fn fitness_matches_valid_decode_of_genome() {
        let items = vec![5, 5, 5, 5];
        let mut rng = create_rng(3);
        let rows = generate_initial_matrix_population(&items, 10, 4, false, GenerationMode::Ff, &mut rng);
        for row in &rows {
            assert_eq!(row.fitness, fitness_of(&row.genome, 10));
        }
    }
}
