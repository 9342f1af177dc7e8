use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Particle, ParticleKey};
use crate::state::ClusterState;

fn particle(key: u64, mass: f64, x: f64, vx: f64) -> Particle {
    Particle::new(
        ParticleKey(key),
        mass,
        0.0,
        Point3::new(x, 0.0, 0.0),
        Vector3::new(vx, 0.0, 0.0),
    )
}

#[test]
fn test_add_and_get() {
    let mut state = ClusterState::default();
    state.add_particle(particle(7, 1.0, 0.0, 0.0));

    assert_eq!(state.particle_count(), 1);
    assert!(state.get(ParticleKey(7)).is_some());
    assert!(state.get(ParticleKey(8)).is_none());
}

#[test]
fn test_remove_particle() {
    let mut state = ClusterState::new(vec![
        particle(0, 1.0, 0.0, 0.0),
        particle(1, 2.0, 1.0, 0.0),
    ]);

    let removed = state.remove_particle(ParticleKey(0));
    assert_eq!(removed.map(|p| p.key), Some(ParticleKey(0)));
    assert_eq!(state.particle_count(), 1);
    assert!(state.remove_particle(ParticleKey(0)).is_none());
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut state = ClusterState::new(vec![particle(0, 1.0, 0.0, 0.0)]);
    if let Some(p) = state.get_mut(ParticleKey(0)) {
        p.mass = 3.0;
    }
    assert_eq!(state.total_mass(), 3.0);
}

#[test]
fn test_move_to_center() {
    let mut state = ClusterState::new(vec![
        particle(0, 1.0, 10.0, 2.0),
        particle(1, 3.0, 20.0, -1.0),
    ]);

    state.move_to_center();

    let com = state.center_of_mass();
    assert_relative_eq!(com.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(state.total_momentum().magnitude(), 0.0, epsilon = 1e-12);
}
