use nalgebra::{Point3, Vector3};

use crate::body::{Particle, ParticleKey};
use crate::collisions::detection::*;
use crate::state::ClusterState;

fn at(key: u64, x: f64, radius: f64) -> Particle {
    Particle::new(
        ParticleKey(key),
        1.0,
        radius,
        Point3::new(x, 0.0, 0.0),
        Vector3::zeros(),
    )
}

#[test]
fn test_detects_overlapping_pair() {
    let state = ClusterState::new(vec![at(0, 0.0, 1.0), at(1, 1.5, 1.0)]);

    let events = detect_collisions(&state);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].particle_a, ParticleKey(0));
    assert_eq!(events[0].particle_b, ParticleKey(1));
    assert_eq!(events[0].collision_radius, 2.0);
}

#[test]
fn test_ignores_distant_pair() {
    let state = ClusterState::new(vec![at(0, 0.0, 1.0), at(1, 5.0, 1.0)]);
    assert!(detect_collisions(&state).is_empty());
}

#[test]
fn test_touching_is_not_a_collision() {
    let state = ClusterState::new(vec![at(0, 0.0, 1.0), at(1, 2.0, 1.0)]);
    assert!(detect_collisions(&state).is_empty());
}

#[test]
fn test_ordered_pair() {
    let event = CollisionEvent {
        particle_a: ParticleKey(9),
        particle_b: ParticleKey(2),
        separation: 1.0,
        collision_radius: 2.0,
    };
    assert_eq!(event.ordered_pair(), (ParticleKey(2), ParticleKey(9)));
}

#[test]
fn test_multiple_pairs() {
    let state = ClusterState::new(vec![
        at(0, 0.0, 1.0),
        at(1, 1.0, 1.0),
        at(2, 100.0, 1.0),
        at(3, 101.0, 1.0),
    ]);

    let events = detect_collisions(&state);
    assert_eq!(events.len(), 2);
}
