//! Primitive utilities shared by every search routine (spec §4.1).
//!
//! Free functions over plain slices, matching `u-metaheur`'s style for
//! stateless operators (`ga::operators::swap_mutation` and friends):
//! no wrapper struct, no trait, just a function.

/// The theoretical minimum bin count: `⌈Σ items / C⌉`.
///
/// No feasible packing can use fewer bins than this.
pub fn lower_bound(items: &[u64], capacity: u64) -> usize {
    let total: u64 = items.iter().sum();
    (total.div_ceil(capacity)) as usize
}

/// Merges two ascending sequences into one ascending sequence in linear time.
///
/// Used to keep bins in canonical ascending form after any item
/// migration (spec §3: "Bins are kept in canonical ascending form
/// whenever operators exit").
pub fn sorted_merge(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] <= b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// The termination predicate shared by every outer search loop (spec §4.1).
///
/// `true` means "keep going". `target` is always the theoretical
/// minimum, never strictly below it (spec: incumbent_fit > target is
/// the only fitness-side stopping condition).
///
/// Per spec §9 Open Question 3, the predicate is checked once per outer
/// iteration, so a single iteration may run past `time_budget` before
/// this returns `false` — that overrun is allowed, not a bug.
#[allow(clippy::too_many_arguments)]
pub fn continue_search(
    target: usize,
    incumbent_fit: usize,
    time_budget: Option<f64>,
    t_start: std::time::Instant,
    t_now: std::time::Instant,
    it_budget: Option<usize>,
    it: usize,
) -> bool {
    if incumbent_fit <= target {
        return false;
    }
    if let Some(budget) = it_budget {
        if it > budget {
            return false;
        }
    }
    if let Some(budget) = time_budget {
        if (t_now - t_start).as_secs_f64() >= budget {
            return false;
        }
    }
    true
}

/// Returns `true` iff the multiset union of `bins` equals the multiset of `items`.
///
/// This is the mass-conservation check invoked after every operator
/// that is contractually required to preserve it.
pub fn mass_conservation_ok(bins: &[Vec<u64>], items: &[u64]) -> bool {
    let mut packed: Vec<u64> = bins.iter().flatten().copied().collect();
    let mut reference: Vec<u64> = items.to_vec();
    packed.sort_unstable();
    reference.sort_unstable();
    packed == reference
}

/// The fitness (bin count) of an encoding, decoded via the VALID one-pass sweep.
pub fn fitness_of(genome: &[u64], capacity: u64) -> usize {
    crate::encoding::valid_sweep(genome, capacity).len()
}

/// Roulette-wheel selection over fitness values, skewed by a selection-
/// pressure exponent `gamma` (spec §2's shared `tournament_roulette`
/// primitive, named directly in `original_source`'s `abc.py`
/// `tournament_roulette(sources, gama)` call sites).
///
/// Grounded in `u-metaheur`'s `ga::selection::roulette` inverse-fitness
/// weighting (`weight_i = max_fitness - fitness_i + epsilon`), extended
/// with a `gamma` exponent on the inverted weight so callers can tune
/// selection pressure the way ABC's `gama` parameter does: `gamma = 1.0`
/// reproduces that plain roulette, higher values concentrate
/// probability mass on the lower-fitness entries.
///
/// Lower fitness is better (spec's ranking rule). Panics if `fitnesses`
/// is empty.
pub fn tournament_roulette<R: rand::Rng>(fitnesses: &[usize], gamma: f64, rng: &mut R) -> usize {
    let n = fitnesses.len();
    assert!(n > 0, "cannot select from an empty population");
    if n == 1 {
        return 0;
    }

    let max_fitness = fitnesses.iter().copied().max().unwrap() as f64;
    let epsilon = 1e-10;
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| (max_fitness - f as f64 + epsilon).max(epsilon).powf(gamma))
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}
