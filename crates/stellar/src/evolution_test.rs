use approx::assert_relative_eq;
use units::{Mass, Time};

use crate::evolution::*;

#[test]
fn test_main_sequence_lifetime() {
    let sun = main_sequence_lifetime(Mass::from_solar_masses(1.0));
    assert_relative_eq!(sun.to_years(), 1.0e10, max_relative = 1e-12);

    // 10 M☉: 10^10 * 10^-2.5 ≈ 31.6 Myr
    let massive = main_sequence_lifetime(Mass::from_solar_masses(10.0));
    assert_relative_eq!(massive.to_myr(), 31.6227766, max_relative = 1e-6);
}

#[test]
fn test_low_mass_star_never_explodes() {
    let mut code = ParametricEvolution::new(vec![StellarParticle::new(1, Mass::from_solar_masses(5.0))]);

    code.evolve_model(Time::from_myr(500.0));

    assert!(code.take_supernovae().is_empty());
    assert_eq!(code.particle(1).map(|p| p.mass), Some(Mass::from_solar_masses(5.0)));
}

#[test]
fn test_massive_star_explodes_after_lifetime() {
    // 40 M☉: lifetime ≈ 0.99 Myr
    let mut code = ParametricEvolution::new(vec![
        StellarParticle::new(1, Mass::from_solar_masses(40.0)),
        StellarParticle::new(2, Mass::from_solar_masses(3.0)),
    ]);

    code.evolve_model(Time::from_myr(0.5));
    assert!(code.take_supernovae().is_empty());

    code.evolve_model(Time::from_myr(1.5));
    assert_eq!(code.take_supernovae(), vec![1]);
    assert!(code.take_supernovae().is_empty());

    let remnant = code.particle(1).map(|p| p.mass.to_solar_masses());
    assert_eq!(remnant, Some(NEUTRON_STAR_MASS));
}

#[test]
fn test_explosion_reported_once() {
    let mut code = ParametricEvolution::new(vec![StellarParticle::new(1, Mass::from_solar_masses(40.0))]);

    code.evolve_model(Time::from_myr(2.0));
    code.evolve_model(Time::from_myr(3.0));

    assert_eq!(code.take_supernovae(), vec![1]);
}

#[test]
fn test_evolve_backwards_is_ignored() {
    let mut code = ParametricEvolution::new(vec![StellarParticle::new(1, Mass::from_solar_masses(20.0))]);

    code.evolve_model(Time::from_myr(1.0));
    code.evolve_model(Time::from_myr(0.5));

    assert_relative_eq!(code.model_time().to_myr(), 1.0);
    assert_relative_eq!(code.particle(1).map(|p| p.age.to_myr()).unwrap_or(0.0), 1.0);
}

#[test]
fn test_remove_particle() {
    let mut code = ParametricEvolution::new(vec![StellarParticle::new(4, Mass::from_solar_masses(20.0))]);

    assert!(code.remove_particle(4).is_some());
    assert!(code.remove_particle(4).is_none());
    assert!(code.particles().is_empty());
}

#[test]
fn test_default_code_is_empty_at_time_zero() {
    let mut code = ParametricEvolution::default();
    assert_eq!(code.model_time(), Time::zero());
    assert!(code.particles().is_empty());

    code.evolve_model(Time::from_myr(50.0));
    assert!(code.take_supernovae().is_empty());
}
