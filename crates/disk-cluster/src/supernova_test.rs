use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use units::{Length, SurfaceDensity};

use crate::registry::DiskRegistry;
use crate::supernova::{disruption_radius, respond_to_supernova, SupernovaEffect, DISRUPTION_A};
use crate::test_support::{bright_star, disk_star};

fn parsecs(value: f64) -> f64 {
    Length::from_parsecs(value).to_au()
}

fn truncation_floor() -> SurfaceDensity {
    SurfaceDensity::from_grams_per_cm2(1e-11)
}

#[test]
fn test_disruption_radius() {
    let one_pc = Length::from_parsecs(1.0);
    assert_relative_eq!(disruption_radius(one_pc, 0.0).to_au(), DISRUPTION_A, max_relative = 1e-12);

    assert_eq!(disruption_radius(Length::zero(), 0.0), Length::zero());
    assert!(disruption_radius(Length::from_parsecs(0.1), 0.0) < disruption_radius(one_pc, 0.0));
}

#[test]
fn test_distant_supernova_leaves_disk() {
    let mut registry = DiskRegistry::new();
    let exploding = bright_star(0, 20.0, Point3::origin());
    let mut star = disk_star(1, 1.0, Point3::new(parsecs(3.0), 0.0, 0.0), Vector3::zeros(), &mut registry);
    let radius = star.disk_radius;
    let disk = registry.get_mut(star.key).unwrap();

    let effect = respond_to_supernova(&exploding, &mut star, disk, truncation_floor());

    assert_eq!(effect, SupernovaEffect::Unaffected);
    assert_eq!(star.disk_radius, radius);
    assert!(!star.nearby_supernova);
}

#[test]
fn test_nearby_supernova_truncates_disk() {
    let mut registry = DiskRegistry::new();
    let exploding = bright_star(0, 20.0, Point3::origin());
    // r_disk ≈ 66 (0.1)^0.626 ≈ 15.6 au
    let mut star = disk_star(1, 1.0, Point3::new(parsecs(0.1), 0.0, 0.0), Vector3::zeros(), &mut registry);
    let mass = star.disk_mass;
    let disk = registry.get_mut(star.key).unwrap();

    let effect = respond_to_supernova(&exploding, &mut star, disk, truncation_floor());

    assert_eq!(effect, SupernovaEffect::Truncated);
    assert!(star.nearby_supernova);
    assert!(star.disk_radius.to_au() <= 15.7);
    assert!(star.disk_mass < mass);
    assert_eq!(registry.lookup(star.key).unwrap().radius(), star.disk_radius);
}

#[test]
fn test_supernova_on_top_of_disk_destroys_it() {
    let mut registry = DiskRegistry::new();
    let exploding = bright_star(0, 20.0, Point3::new(5.0, 5.0, 5.0));
    let mut star = disk_star(1, 1.0, Point3::new(5.0, 5.0, 5.0), Vector3::zeros(), &mut registry);
    let disk = registry.get_mut(star.key).unwrap();

    let effect = respond_to_supernova(&exploding, &mut star, disk, truncation_floor());

    assert_eq!(effect, SupernovaEffect::Destroyed);
    assert!(star.nearby_supernova);
}
