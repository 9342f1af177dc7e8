//! Close stellar encounters and the truncation of the disks involved.

use nbody::forces::G;
use tracing::{debug, info};
use units::{Length, Mass, SurfaceDensity, Time};

use crate::disk::DiskGrid;
use crate::registry::DiskRegistry;
use crate::star::{pair_mut, Star};

/// Fraction of the periastron adopted as the pair's new collision radius.
pub const COLLISION_RADIUS_FRACTION: f64 = 0.49;

/// Growth of the dynamics-only disk mass whenever that disk is truncated.
pub const NP_MASS_FACTOR: f64 = 1.6;

/// Exponent of the mass ratio in the truncation radius.
const TRUNCATION_MASS_EXPONENT: f64 = 0.32;

/// Thresholds used when truncating disks in an encounter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncounterParams {
    /// Truncation at or below this radius destroys the disk
    pub min_disk_radius: Length,
    /// Column density written outside the truncation radius
    pub truncation_density: SurfaceDensity,
}

impl Default for EncounterParams {
    fn default() -> Self {
        Self {
            min_disk_radius: Length::from_au(0.5),
            truncation_density: SurfaceDensity::from_grams_per_cm2(1e-11),
        }
    }
}

/// What an encounter did to the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncounterOutcome {
    pub periastron: Length,
    /// At least one disk was truncated
    pub truncated: bool,
    /// Disks destroyed outright, in pair order
    pub dispersed: [bool; 2],
}

/// Closest approach of two stars on their current relative two-body orbit.
///
/// With relative energy E = v²/2 − μ/r and specific angular momentum h:
/// ```text
/// p = h²/μ,  e = √(1 + 2Eh²/μ²),  r_peri = p/(1 + e)
/// ```
/// For bound orbits e equals √(1 − p/a); the same expression stays real for
/// parabolic and hyperbolic passes, so no orbit type needs special handling.
pub fn periastron_distance(a: &Star, b: &Star) -> Length {
    let mu = G * (a.mass + b.mass).to_solar_masses();
    let r = a.position - b.position;
    let v = a.velocity - b.velocity;

    let separation = r.magnitude();
    if mu <= 0.0 || separation <= 0.0 {
        return Length::zero();
    }

    let energy = 0.5 * v.magnitude_squared() - mu / separation;
    let h2 = r.cross(&v).magnitude_squared();
    let p = h2 / mu;
    let e = (1.0 + 2.0 * energy * h2 / (mu * mu)).max(0.0).sqrt();

    Length::from_au(p / (1.0 + e))
}

/// Radius a disk is cut down to by a partner passing at `periastron`,
/// R = (r_peri/3) (M_own/M_partner)^0.32.
pub fn truncation_radius(periastron: Length, own_mass: Mass, partner_mass: Mass) -> Length {
    let ratio = own_mass / partner_mass;
    periastron / 3.0 * ratio.powf(TRUNCATION_MASS_EXPONENT)
}

/// Resolve an encounter between `stars[i]` and `stars[j]`.
///
/// Both collision radii shrink to a fraction of the periastron so the same
/// flyby is not detected again. Each star that still owns a disk is then
/// truncated. A disk cut to `min_disk_radius` or less is marked dispersed and
/// left in the registry for the next consistency check to retire.
pub fn resolve_encounter(
    stars: &mut [Star],
    i: usize,
    j: usize,
    registry: &mut DiskRegistry,
    params: &EncounterParams,
    time: Time,
) -> Option<EncounterOutcome> {
    let (a, b) = pair_mut(stars, i, j)?;

    let periastron = periastron_distance(a, b);
    let collision_radius = periastron * COLLISION_RADIUS_FRACTION;
    a.collision_radius = collision_radius;
    b.collision_radius = collision_radius;

    debug!(
        a = %a.key,
        b = %b.key,
        periastron_au = periastron.to_au(),
        "resolving encounter"
    );

    let mass_a = a.stellar_mass;
    let mass_b = b.stellar_mass;
    let (truncated_a, dispersed_a) = truncate_side(a, mass_b, periastron, registry, params, time);
    let (truncated_b, dispersed_b) = truncate_side(b, mass_a, periastron, registry, params, time);

    Some(EncounterOutcome {
        periastron,
        truncated: truncated_a || truncated_b,
        dispersed: [dispersed_a, dispersed_b],
    })
}

/// Apply the encounter to one star. Returns (truncated, dispersed).
fn truncate_side(
    star: &mut Star,
    partner_mass: Mass,
    periastron: Length,
    registry: &mut DiskRegistry,
    params: &EncounterParams,
    time: Time,
) -> (bool, bool) {
    if !star.has_disk() {
        return (false, false);
    }
    let Some(disk) = registry.get_mut(star.key) else {
        return (false, false);
    };

    let radius = truncation_radius(periastron, star.stellar_mass, partner_mass);
    let mut truncated = false;
    let mut dispersed = false;

    if radius < star.disk_radius {
        truncated = true;
        star.encounters += 1;

        if radius <= params.min_disk_radius {
            disperse(star, time);
            dispersed = true;
        } else {
            cut(star, disk, radius, params.truncation_density);
        }
    }

    if radius < star.disk_radius_np {
        star.disk_radius_np = radius;
        star.disk_mass_np = star.disk_mass_np * NP_MASS_FACTOR;
    }

    (truncated, dispersed)
}

fn disperse(star: &mut Star, time: Time) {
    let lost = star.disk_mass;
    star.truncation_mass_loss = lost;
    star.cumulative_truncation_mass_loss += lost;
    star.disk_radius = Length::zero();
    star.disk_mass = Mass::zero();
    star.dispersed = true;
    star.dispersal_time = Some(time);
    star.refresh_total_mass();
    info!(star = %star.key, "disk destroyed in encounter");
}

fn cut(star: &mut Star, disk: &mut DiskGrid, radius: Length, floor: SurfaceDensity) {
    let old_mass = disk.disk_mass(star.disk_radius);
    disk.truncate(radius, floor);
    let new_mass = disk.disk_mass(radius);

    let lost = (old_mass - new_mass).non_negative();
    star.truncation_mass_loss = lost;
    star.cumulative_truncation_mass_loss += lost;
    star.disk_radius = disk.radius();
    star.disk_mass = new_mass;
    star.refresh_total_mass();
    debug!(
        star = %star.key,
        radius_au = star.disk_radius.to_au(),
        lost_mjup = lost.to_jupiter_masses(),
        "disk truncated"
    );
}
