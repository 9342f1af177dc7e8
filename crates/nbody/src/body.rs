use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use units::{Length, Mass};

/// Stable identity of a particle, shared with every other code that tracks
/// the same star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleKey(pub u64);

impl std::fmt::Display for ParticleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub key: ParticleKey,
    pub mass: f64,              // Solar masses
    pub collision_radius: f64,  // AU
    pub position: Point3<f64>,  // AU
    pub velocity: Vector3<f64>, // AU/year
}

impl Particle {
    pub fn new(
        key: ParticleKey,
        mass: f64,
        collision_radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            key,
            mass,
            collision_radius,
            position,
            velocity,
        }
    }

    /// Builds a particle from typed quantities.
    pub fn from_units(
        key: ParticleKey,
        mass: Mass,
        collision_radius: Length,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self::new(
            key,
            mass.to_solar_masses(),
            collision_radius.to_au(),
            position,
            velocity,
        )
    }

    pub fn mass(&self) -> Mass {
        Mass::from_solar_masses(self.mass)
    }

    pub fn collision_radius(&self) -> Length {
        Length::from_au(self.collision_radius)
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.position - other.position).magnitude()
    }
}
