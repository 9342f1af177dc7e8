//! A self-contained gravity code with encounter stopping conditions.
//!
//! `NbodyCode` advances a [`ClusterState`] to a requested model time using
//! adaptive leapfrog sub-steps and records every pair whose separation fell
//! below the sum of their collision radii along the way. Pairs are reported
//! once per [`NbodyCode::evolve_model`] call, in detection order.

use std::collections::HashSet;

use crate::body::{Particle, ParticleKey};
use crate::collisions::{detect_collisions, CollisionEvent};
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{Integrator, Leapfrog};
use crate::state::ClusterState;

/// Lower bound on a sub-step as a fraction of the requested interval.
const MIN_SUBSTEP_FRACTION: f64 = 1e-6;

pub struct NbodyCode {
    state: ClusterState,
    gravity: DirectGravity,
    integrator: Leapfrog,
    /// Accuracy parameter η in dt = η √(ε / |a|)
    timestep_parameter: f64,
    collisions: Vec<CollisionEvent>,
}

impl NbodyCode {
    /// # Arguments
    /// * `particles` - Initial particle set
    /// * `softening` - Plummer softening length (AU)
    /// * `timestep_parameter` - Sub-step accuracy parameter η
    pub fn new(particles: Vec<Particle>, softening: f64, timestep_parameter: f64) -> Self {
        Self {
            state: ClusterState::new(particles),
            gravity: DirectGravity::with_softening(softening),
            integrator: Leapfrog,
            timestep_parameter,
            collisions: Vec::new(),
        }
    }

    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn model_time(&self) -> f64 {
        self.state.time
    }

    pub fn particle(&self, key: ParticleKey) -> Option<&Particle> {
        self.state.get(key)
    }

    pub fn particle_mut(&mut self, key: ParticleKey) -> Option<&mut Particle> {
        self.state.get_mut(key)
    }

    pub fn remove_particle(&mut self, key: ParticleKey) -> Option<Particle> {
        self.state.remove_particle(key)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.state)
    }

    /// Largest stable sub-step (years) for the current configuration.
    ///
    /// Uses the softening length as the length scale; with no softening the
    /// smallest pair separation is used instead.
    pub fn suggest_timestep(&self) -> f64 {
        let length_scale = if self.gravity.softening > 0.0 {
            self.gravity.softening
        } else {
            self.min_separation()
        };

        (0..self.state.particles.len())
            .map(|i| self.gravity.acceleration(i, &self.state).magnitude())
            .filter(|a| *a > 0.0)
            .map(|a| self.timestep_parameter * (length_scale / a).sqrt())
            .fold(f64::INFINITY, f64::min)
    }

    fn min_separation(&self) -> f64 {
        let particles = &self.state.particles;
        (0..particles.len())
            .flat_map(|i| ((i + 1)..particles.len()).map(move |j| (i, j)))
            .map(|(i, j)| particles[i].distance_to(&particles[j]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Advance the model to `end_time` (years).
    ///
    /// Encounters detected after any sub-step are queued; retrieve them with
    /// [`NbodyCode::take_collisions`].
    pub fn evolve_model(&mut self, end_time: f64) {
        let span = end_time - self.state.time;
        if span <= 0.0 {
            return;
        }
        let min_step = span * MIN_SUBSTEP_FRACTION;
        let mut seen: HashSet<(ParticleKey, ParticleKey)> = self
            .collisions
            .iter()
            .map(CollisionEvent::ordered_pair)
            .collect();

        while self.state.time < end_time {
            let remaining = end_time - self.state.time;
            let dt = self.suggest_timestep().max(min_step).min(remaining);
            self.integrator.step(&mut self.state, dt, &self.gravity);

            for event in detect_collisions(&self.state) {
                if seen.insert(event.ordered_pair()) {
                    self.collisions.push(event);
                }
            }

            // Guard against the last sub-step landing a hair short.
            if end_time - self.state.time <= min_step {
                self.state.time = end_time;
            }
        }
    }

    /// Drain the encounters detected since the last call.
    pub fn take_collisions(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.collisions)
    }
}
