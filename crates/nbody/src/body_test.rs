use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use units::{Length, Mass};

use crate::body::{Particle, ParticleKey};

#[test]
fn test_from_units() {
    let particle = Particle::from_units(
        ParticleKey(3),
        Mass::from_solar_masses(0.5),
        Length::from_parsecs(0.02),
        Point3::origin(),
        Vector3::zeros(),
    );

    assert_eq!(particle.mass, 0.5);
    assert_relative_eq!(particle.collision_radius, 0.02 * 206264.806, epsilon = 1e-6);
    assert_relative_eq!(particle.collision_radius().to_parsecs(), 0.02, epsilon = 1e-12);
}

#[test]
fn test_momentum() {
    let particle = Particle::new(
        ParticleKey(0),
        2.0,
        0.01,
        Point3::new(1.0, 0.0, 0.0),
        Vector3::new(3.0, 4.0, 0.0),
    );

    assert_eq!(particle.momentum(), Vector3::new(6.0, 8.0, 0.0));
}

#[test]
fn test_kinetic_energy() {
    let particle = Particle::new(
        ParticleKey(0),
        2.0,
        0.0,
        Point3::origin(),
        Vector3::new(1.0, 2.0, 2.0),
    );

    // 0.5 * 2 * 9
    assert_relative_eq!(particle.kinetic_energy(), 9.0);
}

#[test]
fn test_distance_to() {
    let a = Particle::new(ParticleKey(0), 1.0, 0.0, Point3::new(1.0, 2.0, 3.0), Vector3::zeros());
    let b = Particle::new(ParticleKey(1), 1.0, 0.0, Point3::new(4.0, 6.0, 3.0), Vector3::zeros());

    assert_relative_eq!(a.distance_to(&b), 5.0);
    assert_relative_eq!(b.distance_to(&a), 5.0);
}

#[test]
fn test_key_display() {
    assert_eq!(ParticleKey(42).to_string(), "#42");
}
