use nalgebra::{Point3, Vector3};
use units::{Length, Mass, SurfaceDensity};

use crate::disk::{DiskGrid, GridParams};
use crate::registry::DiskRegistry;
use crate::star::{Star, StarKey};

/// A star of `mass` M☉ whose initial disk (100 au √M, 0.1 M) is registered.
pub fn disk_star(
    key: u64,
    mass: f64,
    position: Point3<f64>,
    velocity: Vector3<f64>,
    registry: &mut DiskRegistry,
) -> Star {
    let mut star = Star::new(
        StarKey(key),
        Mass::from_solar_masses(mass),
        position,
        velocity,
        Length::from_parsecs(0.02),
        false,
    );
    let disk = DiskGrid::lynden_bell_pringle(
        &GridParams::default(),
        star.stellar_mass,
        Length::from_au(100.0 * mass.sqrt()),
        Mass::from_solar_masses(0.1 * mass),
    );
    star.disk_radius = disk.radius();
    star.disk_mass = disk.mass();
    star.initial_disk_radius = star.disk_radius;
    star.initial_disk_mass = star.disk_mass;
    star.disk_radius_np = star.disk_radius;
    star.disk_mass_np = star.disk_mass;
    star.dispersion_threshold = SurfaceDensity::from_grams_per_cm2(1e-5);
    star.refresh_total_mass();
    registry.register(star.key, disk).unwrap();
    star
}

/// A bright star without a disk.
pub fn bright_star(key: u64, mass: f64, position: Point3<f64>) -> Star {
    Star::new(
        StarKey(key),
        Mass::from_solar_masses(mass),
        position,
        Vector3::zeros(),
        Length::from_parsecs(0.02),
        true,
    )
}
