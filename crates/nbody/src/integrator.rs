//! Time integration for cluster particle sets

use crate::forces::ForceModel;
use crate::state::ClusterState;
use nalgebra::Vector3;

/// A time integrator for particle sets.
pub trait Integrator: Send + Sync {
    /// Advance the state by `dt` years.
    fn step(&self, state: &mut ClusterState, dt: f64, force: &dyn ForceModel);
}

/// Symplectic kick-drift-kick leapfrog (2nd order).
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
#[derive(Debug, Default, Clone, Copy)]
pub struct Leapfrog;

impl Leapfrog {
    fn kick(&self, state: &mut ClusterState, dt_half: f64, force: &dyn ForceModel) {
        let accelerations: Vec<Vector3<f64>> = (0..state.particles.len())
            .map(|i| force.acceleration(i, state))
            .collect();

        state
            .particles
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(particle, accel)| {
                particle.velocity += accel * dt_half;
            });
    }

    fn drift(&self, state: &mut ClusterState, dt: f64) {
        state.particles.iter_mut().for_each(|particle| {
            particle.position += particle.velocity * dt;
        });
    }
}

impl Integrator for Leapfrog {
    fn step(&self, state: &mut ClusterState, dt: f64, force: &dyn ForceModel) {
        self.kick(state, dt / 2.0, force);
        self.drift(state, dt);
        self.kick(state, dt / 2.0, force);

        state.time += dt;
    }
}
