//! Circumstellar disks on a radial grid.
//!
//! A [`DiskGrid`] holds the column density of one disk on logarithmically
//! spaced annuli and advances it with an explicit viscous solver. The query
//! layer in [`query`] reads radii, masses and densities off the grid and
//! removes mass from its outer edge.

pub(crate) mod constants;
mod grid;
pub mod query;

#[cfg(test)]
mod grid_test;
#[cfg(test)]
mod query_test;

pub use grid::{accretion_rate, DensityFloors, DiskGrid, EvolveOutcome, GridParams};
