//! Protoplanetary disks in a young star cluster.
//!
//! Every low-mass star carries a viscously evolving gas disk on a radial
//! grid. Disks are truncated by close stellar encounters, photoevaporated by
//! the FUV and EUV radiation of the bright stars, and stripped or destroyed
//! by their supernovae. [`simulation::Simulation`] drives the coupled
//! evolution, with gravity and stellar evolution supplied through the
//! [`simulation::GravityCode`] and [`simulation::StellarCode`] traits.

pub mod config;
pub mod disk;
pub mod encounter;
pub mod error;
pub mod photoevaporation;
pub mod registry;
pub mod simulation;
pub mod star;
pub mod supernova;

#[cfg(test)]
mod supernova_test;
#[cfg(test)]
mod test_support;

pub use config::{ConfigOverrides, SimulationConfig};
pub use disk::{DiskGrid, EvolveOutcome, GridParams};
pub use error::{DiskClusterError, Result};
pub use photoevaporation::{MassLossGrid, PhotoevaporationEngine};
pub use registry::{DiskRegistry, RetirementCause};
pub use simulation::{RunSummary, Simulation, SimulationState};
pub use star::{Star, StarKey};
