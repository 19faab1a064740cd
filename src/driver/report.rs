//! Progress reporting (spec §6): a human-readable table, one row per
//! completed heuristic, returned as data rather than printed — this
//! crate has no CLI front-end to dress up (see SPEC_FULL.md §6), so
//! rendering is a `Display` impl a consuming binary can route through
//! `tracing`/`colored`/stdout as it likes.

use std::fmt;

use crate::packing::Packing;

/// One row of the progress table: a single heuristic's completed run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicRunReport {
    /// The heuristic's name (spec §6 column: "name").
    pub name: String,
    /// Instance size (`|items|`, spec §6 column: "instance size").
    pub instance_size: usize,
    /// Bin capacity (spec §6 column: "capacity").
    pub capacity: u64,
    /// This run's fitness (spec §6 column: "best fit").
    pub best_fit: usize,
    /// The theoretical minimum bin count (spec §6 column: "TM").
    pub theoretical_minimum: usize,
    /// Wall-clock seconds this heuristic ran for (spec §6 column: "elapsed").
    pub elapsed: f64,
}

/// The result of [`crate::solve`]: the final packing, its bin count, and
/// one [`HeuristicRunReport`] per heuristic that completed.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    pub packing: Packing,
    pub bin_count: usize,
    pub reports: Vec<HeuristicRunReport>,
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>8} {:>10} {:>9} {:>5} {:>10}",
            "heuristic", "items", "capacity", "best_fit", "TM", "elapsed_s"
        )?;
        for r in &self.reports {
            writeln!(
                f,
                "{:<16} {:>8} {:>10} {:>9} {:>5} {:>10.3}",
                r.name, r.instance_size, r.capacity, r.best_fit, r.theoretical_minimum, r.elapsed
            )?;
        }
        writeln!(f, "-> incumbent bin count: {}", self.bin_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::Bin;

    #[test]
    fn display_includes_every_reported_heuristic() {
        let report = SolveReport {
            packing: Packing::new(vec![Bin::new(vec![5, 5])]),
            bin_count: 1,
            reports: vec![
                HeuristicRunReport {
                    name: "cns".into(),
                    instance_size: 4,
                    capacity: 10,
                    best_fit: 2,
                    theoretical_minimum: 2,
                    elapsed: 0.01,
                },
                HeuristicRunReport {
                    name: "pso".into(),
                    instance_size: 4,
                    capacity: 10,
                    best_fit: 2,
                    theoretical_minimum: 2,
                    elapsed: 0.02,
                },
            ],
        };
        let rendered = report.to_string();
        assert!(rendered.contains("cns"));
        assert!(rendered.contains("pso"));
        assert!(rendered.contains("incumbent bin count: 1"));
    }
}
