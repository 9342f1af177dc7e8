//! Force models for cluster dynamics

use crate::state::ClusterState;
use nalgebra::Vector3;

pub mod gravity;


pub use gravity::DirectGravity;

/// Gravitational constant in AU³ M☉⁻¹ year⁻²
/// G = 4π² ≈ 39.478417
pub const G: f64 = 39.478417;

/// A source of acceleration on particles.
pub trait ForceModel: Send + Sync {
    /// Acceleration (AU/year²) on the particle at index `idx`.
    fn acceleration(&self, idx: usize, state: &ClusterState) -> Vector3<f64>;

    /// Potential energy in M☉ AU² year⁻². Zero unless overridden.
    fn potential_energy(&self, _state: &ClusterState) -> f64 {
        0.0
    }
}
