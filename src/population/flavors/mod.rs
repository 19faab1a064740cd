//! Concrete `PopulationUpdateRule` flavors.
//!
//! A representative, literature-diverse subset of the swarm/evolutionary
//! families named in spec §1: each supplies only its numeric update
//! formula (and, where it has one, a local-search hook). Reimplementing
//! every named flavor verbatim is explicitly not required.

pub mod abc;
pub mod ga_cgt;
pub mod jaya;
pub mod pso;
pub mod sa;
