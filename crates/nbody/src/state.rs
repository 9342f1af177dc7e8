use crate::body::{Particle, ParticleKey};
use nalgebra::{Point3, Vector3};

/// Particle set of a cluster at a given time.
#[derive(Debug, Clone, Default)]
pub struct ClusterState {
    /// Current model time in years
    pub time: f64,
    pub particles: Vec<Particle>,
}

impl ClusterState {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self {
            time: 0.0,
            particles,
        }
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes a particle, returning it if it was present.
    pub fn remove_particle(&mut self, key: ParticleKey) -> Option<Particle> {
        self.particles
            .iter()
            .position(|p| p.key == key)
            .map(|idx| self.particles.remove(idx))
    }

    pub fn get(&self, key: ParticleKey) -> Option<&Particle> {
        self.particles.iter().find(|p| p.key == key)
    }

    pub fn get_mut(&mut self, key: ParticleKey) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.key == key)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.particles
            .iter()
            .map(|p| p.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Mass-weighted centre of the particle set.
    pub fn center_of_mass(&self) -> Point3<f64> {
        let total = self.total_mass();
        if total <= 0.0 {
            return Point3::origin();
        }
        let weighted = self
            .particles
            .iter()
            .map(|p| p.position.coords * p.mass)
            .fold(Vector3::zeros(), |acc, r| acc + r);
        Point3::from(weighted / total)
    }

    /// Shifts positions and velocities so the centre of mass is at rest at the origin.
    pub fn move_to_center(&mut self) {
        let total = self.total_mass();
        if total <= 0.0 {
            return;
        }
        let com = self.center_of_mass().coords;
        let com_velocity = self.total_momentum() / total;
        for p in &mut self.particles {
            p.position -= com;
            p.velocity -= com_velocity;
        }
    }
}
