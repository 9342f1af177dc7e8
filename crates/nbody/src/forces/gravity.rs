//! Direct N-body gravity (O(N²) implementation)

use crate::forces::{ForceModel, G};
use crate::state::ClusterState;
use nalgebra::Vector3;

/// Direct O(N²) pairwise gravity with Plummer softening.
///
/// Cluster simulations soften close encounters (the default used for
/// disk-bearing clusters is 100 AU) so that the integrator does not have to
/// resolve individual binary orbits; the encounter itself is handled
/// analytically by the caller.
///
/// # Examples
///
/// ```
/// use nbody::forces::{DirectGravity, ForceModel};
/// use nbody::{ClusterState, Particle, ParticleKey};
/// use nalgebra::{Point3, Vector3};
///
/// let state = ClusterState::new(vec![
///     Particle::new(ParticleKey(0), 1.0, 0.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros()),
///     Particle::new(ParticleKey(1), 1.0, 0.0, Point3::new(10.0, 0.0, 0.0), Vector3::zeros()),
/// ]);
///
/// let gravity = DirectGravity::with_softening(1.0);
/// assert!(gravity.acceleration(0, &state).x > 0.0);
/// ```
pub struct DirectGravity {
    /// Softening length (AU)
    pub softening: f64,
}

impl DirectGravity {
    pub fn new() -> Self {
        Self { softening: 0.0 }
    }

    pub fn with_softening(softening: f64) -> Self {
        Self { softening }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn acceleration(&self, idx: usize, state: &ClusterState) -> Vector3<f64> {
        let particle = &state.particles[idx];
        let eps2 = self.softening * self.softening;

        state
            .particles
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, other)| {
                let dr = other.position - particle.position;
                let r2 = dr.magnitude_squared() + eps2;
                let r = r2.sqrt();
                dr * (G * other.mass / (r2 * r))
            })
            .fold(Vector3::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, state: &ClusterState) -> f64 {
        let eps2 = self.softening * self.softening;

        state
            .particles
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                state.particles[i + 1..].iter().map(move |b| {
                    let r = ((a.position - b.position).magnitude_squared() + eps2).sqrt();
                    -G * a.mass * b.mass / r
                })
            })
            .sum()
    }
}
