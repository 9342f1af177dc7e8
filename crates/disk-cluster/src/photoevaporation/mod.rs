//! Photoevaporative mass loss driven by the cluster's bright stars.
//!
//! Close to an ionizing star a disk loses mass at the analytic EUV rate;
//! everywhere else the FUV rate is read from a precomputed mass-loss grid
//! by nearest-neighbour lookup among the rows bracketing the query.

mod engine;
pub mod mass_loss_grid;
pub mod radiation;

#[cfg(test)]
mod mass_loss_grid_test;

pub use engine::{PhotoevaporationEngine, PhotoevaporationOutcome};
pub use mass_loss_grid::{Axis, FuvQuery, MassLossGrid, MassLossRow};
