use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Particle, ParticleKey};
use crate::code::NbodyCode;

fn head_on(separation: f64, speed: f64, radius: f64) -> Vec<Particle> {
    vec![
        Particle::new(
            ParticleKey(0),
            1.0,
            radius,
            Point3::new(-separation / 2.0, 0.0, 0.0),
            Vector3::new(speed, 0.0, 0.0),
        ),
        Particle::new(
            ParticleKey(1),
            1.0,
            radius,
            Point3::new(separation / 2.0, 0.0, 0.0),
            Vector3::new(-speed, 0.0, 0.0),
        ),
    ]
}

#[test]
fn test_evolve_model_reaches_end_time() {
    let mut code = NbodyCode::new(head_on(1.0e5, 0.0, 0.0), 100.0, 0.01);

    code.evolve_model(1000.0);

    assert_relative_eq!(code.model_time(), 1000.0);
}

#[test]
fn test_evolve_model_backwards_is_noop() {
    let mut code = NbodyCode::new(head_on(1.0e5, 0.0, 0.0), 100.0, 0.01);
    code.evolve_model(10.0);
    code.evolve_model(5.0);

    assert_relative_eq!(code.model_time(), 10.0);
}

#[test]
fn test_encounter_reported_once() {
    // Approaching at 2 AU/yr each; gap closes well within the interval
    let mut code = NbodyCode::new(head_on(2000.0, 2.0, 200.0), 100.0, 0.01);

    code.evolve_model(1000.0);
    let events = code.take_collisions();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ordered_pair(), (ParticleKey(0), ParticleKey(1)));
    assert!(code.take_collisions().is_empty());
}

#[test]
fn test_energy_conserved_over_flyby() {
    let mut code = NbodyCode::new(head_on(1.0e4, 0.5, 0.0), 100.0, 0.01);
    let initial = code.kinetic_energy() + code.potential_energy();

    code.evolve_model(5.0e4);

    let final_energy = code.kinetic_energy() + code.potential_energy();
    let drift = ((final_energy - initial) / initial).abs();
    println!("Energy drift over flyby: {:.2e}", drift);
    assert!(drift < 1e-3);
}

#[test]
fn test_remove_and_update_particle() {
    let mut code = NbodyCode::new(head_on(1000.0, 0.0, 5.0), 100.0, 0.01);

    if let Some(p) = code.particle_mut(ParticleKey(0)) {
        p.collision_radius = 1.0;
    }
    assert_eq!(code.particle(ParticleKey(0)).map(|p| p.collision_radius), Some(1.0));

    assert!(code.remove_particle(ParticleKey(1)).is_some());
    assert_eq!(code.state().particle_count(), 1);
}
