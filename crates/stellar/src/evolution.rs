//! Parametric stellar evolution
//!
//! Massive stars are followed along the main sequence only. A star whose age
//! passes its main-sequence lifetime and whose initial mass is at least
//! [`SUPERNOVA_PROGENITOR_MASS`] explodes and is replaced by a neutron-star
//! remnant. Explosions are queued as stopping conditions for the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;
use units::{Mass, Time};

/// Minimum initial mass of a core-collapse progenitor (M☉)
pub const SUPERNOVA_PROGENITOR_MASS: f64 = 8.0;

/// Remnant mass left after core collapse (M☉)
pub const NEUTRON_STAR_MASS: f64 = 1.4;

/// Main-sequence lifetime, t ≈ 10 Gyr · (M/M☉)^-2.5
pub fn main_sequence_lifetime(mass: Mass) -> Time {
    Time::from_years(1.0e10 * mass.to_solar_masses().powf(-2.5))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarParticle {
    pub key: u64,
    pub initial_mass: Mass,
    pub mass: Mass,
    pub age: Time,
    pub exploded: bool,
}

impl StellarParticle {
    pub fn new(key: u64, mass: Mass) -> Self {
        Self {
            key,
            initial_mass: mass,
            mass,
            age: Time::zero(),
            exploded: false,
        }
    }

    pub fn lifetime(&self) -> Time {
        main_sequence_lifetime(self.initial_mass)
    }

    pub fn is_supernova_progenitor(&self) -> bool {
        self.initial_mass.to_solar_masses() >= SUPERNOVA_PROGENITOR_MASS
    }
}

/// Evolution code for the massive stars of a cluster.
#[derive(Debug, Clone, Default)]
pub struct ParametricEvolution {
    particles: Vec<StellarParticle>,
    model_time: Time,
    supernovae: Vec<u64>,
}

impl ParametricEvolution {
    pub fn new(particles: Vec<StellarParticle>) -> Self {
        Self {
            particles,
            model_time: Time::zero(),
            supernovae: Vec::new(),
        }
    }

    pub fn model_time(&self) -> Time {
        self.model_time
    }

    pub fn particles(&self) -> &[StellarParticle] {
        &self.particles
    }

    pub fn particle(&self, key: u64) -> Option<&StellarParticle> {
        self.particles.iter().find(|p| p.key == key)
    }

    pub fn add_particle(&mut self, particle: StellarParticle) {
        self.particles.push(particle);
    }

    pub fn remove_particle(&mut self, key: u64) -> Option<StellarParticle> {
        self.particles
            .iter()
            .position(|p| p.key == key)
            .map(|idx| self.particles.remove(idx))
    }

    /// Advance every particle to `end_time`. Requests in the past are ignored.
    pub fn evolve_model(&mut self, end_time: Time) {
        if end_time <= self.model_time {
            return;
        }
        let dt = end_time - self.model_time;

        for particle in self.particles.iter_mut().filter(|p| !p.exploded) {
            particle.age += dt;
            if particle.is_supernova_progenitor() && particle.age >= particle.lifetime() {
                particle.exploded = true;
                particle.mass = Mass::from_solar_masses(NEUTRON_STAR_MASS);
                debug!(
                    key = particle.key,
                    initial_mass = particle.initial_mass.to_solar_masses(),
                    age_myr = particle.age.to_myr(),
                    "core collapse"
                );
                self.supernovae.push(particle.key);
            }
        }

        self.model_time = end_time;
    }

    /// Drain the keys of stars that exploded since the last call.
    pub fn take_supernovae(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.supernovae)
    }
}
