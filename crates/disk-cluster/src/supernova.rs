//! Disk truncation by a nearby supernova (Portegies Zwart 2018).
//!
//! A disk at distance d from the explosion keeps at most
//! r_disk = a · d^b · |cos i|^c AU, with d in parsec.

use tracing::{debug, info};
use units::{Length, SurfaceDensity};

use crate::disk::DiskGrid;
use crate::star::Star;

pub const DISRUPTION_A: f64 = 66.018192;
pub const DISRUPTION_B: f64 = 0.62602783;
pub const DISRUPTION_C: f64 = -0.68226438;

/// What a supernova did to one disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupernovaEffect {
    Unaffected,
    Truncated,
    /// The disk is gone and must be retired.
    Destroyed,
}

/// Largest disk radius that survives a supernova at `distance`, for a disk
/// inclined by `inclination` radians to the blast.
pub fn disruption_radius(distance: Length, inclination: f64) -> Length {
    let d = distance.to_parsecs();
    Length::from_au(DISRUPTION_A * d.powf(DISRUPTION_B) * inclination.cos().abs().powf(DISRUPTION_C))
}

/// Apply the explosion of `exploding` to `star` and its disk.
pub fn respond_to_supernova(
    exploding: &Star,
    star: &mut Star,
    disk: &mut DiskGrid,
    truncation_density: SurfaceDensity,
) -> SupernovaEffect {
    let distance = exploding.distance_to(star);
    // Blast inclination is not modelled; every disk faces the explosion.
    let r_disk = disruption_radius(distance, 0.0);

    if r_disk.is_zero() {
        star.nearby_supernova = true;
        info!(star = %star.key, supernova = %exploding.key, "disk destroyed by supernova");
        return SupernovaEffect::Destroyed;
    }

    if r_disk < star.disk_radius {
        disk.truncate(r_disk, truncation_density);
        star.disk_radius = disk.radius();
        star.disk_mass = disk.disk_mass(star.disk_radius);
        star.refresh_total_mass();
        star.nearby_supernova = true;
        debug!(
            star = %star.key,
            distance_pc = distance.to_parsecs(),
            radius_au = star.disk_radius.to_au(),
            "disk truncated by supernova"
        );
        return SupernovaEffect::Truncated;
    }

    SupernovaEffect::Unaffected
}
