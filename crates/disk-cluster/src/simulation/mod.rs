//! Time-step orchestration of the coupled cluster.

pub mod collaborators;
mod driver;
pub mod initial;
pub mod snapshot;
mod state;


pub use collaborators::{gravity_code, stellar_code, GravityCode, StellarCode};
pub use driver::{RunSummary, Simulation, StepReport};
pub use initial::new_cluster;
pub use snapshot::{EnergyRecord, JsonDirectorySink, NullSink, Snapshot, SnapshotSink};
pub use state::{RunStats, SimulationState};
