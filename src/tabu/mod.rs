//! Tabu memories (spec §3, §4.4).
//!
//! Three independent structures, one per contract: a bounded FIFO of
//! move-index pairs for the bin-level tabu search (§4.7), a bounded
//! structural memory keyed by element-plus-suffix-window for the
//! population repair/local-search hooks, and a frequency/tenure memory
//! for the CNS item-swap search (§4.9).
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

pub mod cns;
pub mod move_index;
pub mod structural;

pub use cns::CnsTabu;
pub use move_index::MoveIndexTabu;
pub use structural::StructuralTabu;
