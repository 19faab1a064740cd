//! Search procedures built on top of the container operations and tabu
//! memories (spec §4.7–§4.9).

pub mod bin_tabu;
pub mod cns;
pub mod descent;

pub use bin_tabu::{BinTabuConfig, BinTabuResult, BinTabuRunner};
pub use cns::{CnsConfig, CnsResult, CnsRunner};
pub use descent::{DescentConfig, DescentResult, DescentRunner};
