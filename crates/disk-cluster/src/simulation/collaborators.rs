//! Boundaries to the gravity and stellar-evolution codes.
//!
//! Both codes keep their own clock, starting at zero when the run starts.

use nalgebra::{Point3, Vector3};
use nbody::{NbodyCode, Particle};
use stellar::{ParametricEvolution, StellarParticle};
use units::{Length, Mass, Time};

use crate::config::SimulationConfig;
use crate::star::{Star, StarKey};

/// Gravitational dynamics of the cluster.
pub trait GravityCode {
    fn evolve_model(&mut self, end_time: Time);

    /// Pairs whose separation fell below the sum of their collision radii
    /// since the last call.
    fn take_encounters(&mut self) -> Vec<(StarKey, StarKey)>;

    /// M☉ AU² yr⁻²
    fn kinetic_energy(&self) -> f64;

    /// M☉ AU² yr⁻²
    fn potential_energy(&self) -> f64;

    /// Position (AU) and velocity (AU/yr) of a particle.
    fn phase_space(&self, key: StarKey) -> Option<(Point3<f64>, Vector3<f64>)>;

    fn set_mass(&mut self, key: StarKey, mass: Mass);

    fn set_collision_radius(&mut self, key: StarKey, radius: Length);

    fn remove(&mut self, key: StarKey);
}

/// Evolution of the massive stars.
pub trait StellarCode {
    fn evolve_model(&mut self, end_time: Time);

    /// Stars that exploded since the last call.
    fn take_supernovae(&mut self) -> Vec<StarKey>;

    fn stellar_mass(&self, key: StarKey) -> Option<Mass>;

    fn remove(&mut self, key: StarKey);
}

impl GravityCode for NbodyCode {
    fn evolve_model(&mut self, end_time: Time) {
        NbodyCode::evolve_model(self, end_time.to_years());
    }

    fn take_encounters(&mut self) -> Vec<(StarKey, StarKey)> {
        self.take_collisions()
            .into_iter()
            .map(|event| (event.particle_a, event.particle_b))
            .collect()
    }

    fn kinetic_energy(&self) -> f64 {
        NbodyCode::kinetic_energy(self)
    }

    fn potential_energy(&self) -> f64 {
        NbodyCode::potential_energy(self)
    }

    fn phase_space(&self, key: StarKey) -> Option<(Point3<f64>, Vector3<f64>)> {
        self.particle(key).map(|p| (p.position, p.velocity))
    }

    fn set_mass(&mut self, key: StarKey, mass: Mass) {
        if let Some(p) = self.particle_mut(key) {
            p.mass = mass.to_solar_masses();
        }
    }

    fn set_collision_radius(&mut self, key: StarKey, radius: Length) {
        if let Some(p) = self.particle_mut(key) {
            p.collision_radius = radius.to_au();
        }
    }

    fn remove(&mut self, key: StarKey) {
        self.remove_particle(key);
    }
}

impl StellarCode for ParametricEvolution {
    fn evolve_model(&mut self, end_time: Time) {
        ParametricEvolution::evolve_model(self, end_time);
    }

    fn take_supernovae(&mut self) -> Vec<StarKey> {
        ParametricEvolution::take_supernovae(self)
            .into_iter()
            .map(StarKey)
            .collect()
    }

    fn stellar_mass(&self, key: StarKey) -> Option<Mass> {
        self.particle(key.0).map(|p| p.mass)
    }

    fn remove(&mut self, key: StarKey) {
        self.remove_particle(key.0);
    }
}

/// Gravity code holding every star at its total mass.
pub fn gravity_code(stars: &[Star], config: &SimulationConfig) -> NbodyCode {
    let particles = stars
        .iter()
        .map(|s| Particle::from_units(s.key, s.mass, s.collision_radius, s.position, s.velocity))
        .collect();
    NbodyCode::new(
        particles,
        config.gravity.softening_au,
        config.gravity.timestep_parameter,
    )
}

/// Stellar-evolution code following the bright stars only.
pub fn stellar_code(stars: &[Star]) -> ParametricEvolution {
    let particles = stars
        .iter()
        .filter(|s| s.bright)
        .map(|s| StellarParticle::new(s.key.0, s.stellar_mass))
        .collect();
    ParametricEvolution::new(particles)
}
