//! One-dimensional bin packing via a metaheuristic search engine.
//!
//! Given a multiset of positive integer item sizes and a fixed bin
//! capacity, partitions the items into the smallest number of bins such
//! that no bin's contents exceed capacity. The core machinery: a
//! reference-solution state machine over flat item-sequence encodings
//! ("genomes") with derived bin packings, a library of neighborhood
//! operators that preserve multiset identity (the Repair contract), a
//! tabu-search move core, a Consistent Neighborhood Search procedure that
//! dismantles and re-packs the incumbent's tail, a family of population
//! metaheuristics sharing one update-rule interface, and a driver that
//! time-boxes multiple heuristics, optionally in parallel, propagating
//! the incumbent between them.
//!
//! # Usage
//!
//! ```
//! use binpack_heur::{solve, Instance, SolveOptions};
//!
//! let instance = Instance::new(vec![8, 7, 6, 5, 4, 3, 2, 1], 10).unwrap();
//! let options = SolveOptions::default().with_time_max(0.2).with_max_workers(1);
//! let report = solve(&instance, &options).unwrap();
//! assert!(report.packing.respects_capacity(10));
//! ```

pub mod container;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod instance;
pub mod packing;
pub mod population;
pub mod primitives;
pub mod random;
pub mod repair;
pub mod search;
pub mod tabu;

pub use driver::{solve, SolveOptions, SolveReport};
pub use error::BppError;
pub use instance::Instance;
