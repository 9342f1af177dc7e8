//! Initial conditions for the cluster: Kroupa masses in a Plummer sphere.

use std::f64::consts::{PI, SQRT_2};

use nalgebra::{Point3, Vector3};
use nbody::forces::G;
use rand::Rng;
use rand_chacha::ChaChaRng;
use stellar::sample_mass_kroupa;
use tracing::{debug, warn};
use units::Mass;

use crate::config::SimulationConfig;
use crate::star::{Star, StarKey};

/// Fraction of the Plummer mass inside which positions are drawn.
const PLUMMER_MASS_CUTOFF: f64 = 0.999;

/// Range for a star promoted to bright when the draw produced none (M☉).
const PROMOTED_MASS_RANGE: (f64, f64) = (2.0, 50.0);

/// Isotropic unit vector.
fn random_direction(rng: &mut ChaChaRng) -> Vector3<f64> {
    let z: f64 = 2.0 * rng.random::<f64>() - 1.0;
    let phi = 2.0 * PI * rng.random::<f64>();
    let rho = (1.0 - z * z).max(0.0).sqrt();
    Vector3::new(rho * phi.cos(), rho * phi.sin(), z)
}

/// Plummer sphere in Hénon units (G = M = 1, scale length 1), following
/// Aarseth, Hénon & Wielen (1974).
pub fn plummer_sphere(n: usize, rng: &mut ChaChaRng) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    (0..n)
        .map(|_| {
            let u = rng.random::<f64>() * PLUMMER_MASS_CUTOFF;
            let r = if u > 0.0 {
                1.0 / (u.powf(-2.0 / 3.0) - 1.0).sqrt()
            } else {
                0.0
            };
            let position = random_direction(rng) * r;

            // von Neumann rejection on g(q) = q² (1 - q²)^3.5, whose maximum is below 0.1
            let q = loop {
                let x: f64 = rng.random();
                let y: f64 = 0.1 * rng.random::<f64>();
                if y < x * x * (1.0 - x * x).powf(3.5) {
                    break x;
                }
            };
            let speed = q * SQRT_2 * (1.0 + r * r).powf(-0.25);
            let velocity = random_direction(rng) * speed;

            (position, velocity)
        })
        .collect()
}

/// Rescale an N-body realisation to virial radius 1 and the given virial
/// ratio `Q = T/|W|`, in units where G = 1 and the total mass is 1.
///
/// `fractions` are the particle masses divided by the total mass.
pub fn scale_to_virial(
    fractions: &[f64],
    phase: &mut [(Vector3<f64>, Vector3<f64>)],
    virial_ratio: f64,
) {
    let n = phase.len().min(fractions.len());
    if n < 2 {
        return;
    }

    let com_pos: Vector3<f64> = (0..n).map(|i| phase[i].0 * fractions[i]).sum();
    let com_vel: Vector3<f64> = (0..n).map(|i| phase[i].1 * fractions[i]).sum();
    for (pos, vel) in phase.iter_mut() {
        *pos -= com_pos;
        *vel -= com_vel;
    }

    let mut potential = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let r = (phase[i].0 - phase[j].0).magnitude();
            if r > 0.0 {
                potential -= fractions[i] * fractions[j] / r;
            }
        }
    }
    let kinetic: f64 = (0..n)
        .map(|i| 0.5 * fractions[i] * phase[i].1.magnitude_squared())
        .sum();

    // Virial radius 1 means W = -1/2
    let position_scale = if potential < 0.0 { -2.0 * potential } else { 1.0 };
    let target_kinetic = 0.5 * virial_ratio;
    let velocity_scale = if kinetic > 0.0 {
        (target_kinetic / kinetic).sqrt()
    } else {
        0.0
    };

    for (pos, vel) in phase.iter_mut() {
        *pos *= position_scale;
        *vel *= velocity_scale;
    }
}

/// Draw the star population described by `config.cluster`.
///
/// Positions are in AU and velocities in AU/yr. Stars heavier than the bright
/// threshold radiate and carry no disk; if none is drawn, star 0 is promoted.
pub fn new_cluster(config: &SimulationConfig, rng: &mut ChaChaRng) -> Vec<Star> {
    let cluster = &config.cluster;
    let n = cluster.n_stars;
    let bright_threshold = cluster.bright_star_mass_msun;

    let mut masses: Vec<f64> = (0..n)
        .map(|_| sample_mass_kroupa(rng, cluster.max_stellar_mass_msun))
        .collect();

    if n > 0 && !masses.iter().any(|&m| m > bright_threshold) {
        let low = PROMOTED_MASS_RANGE.0.max(bright_threshold);
        let high = PROMOTED_MASS_RANGE.1.max(low + 1.0);
        let promoted = rng.random_range(low..high);
        warn!(mass_msun = promoted, "no bright star drawn, promoting star 0");
        masses[0] = promoted;
    }

    let total_mass: f64 = masses.iter().sum();
    let fractions: Vec<f64> = masses.iter().map(|m| m / total_mass).collect();
    let mut phase = plummer_sphere(n, rng);
    scale_to_virial(&fractions, &mut phase, cluster.virial_ratio);

    let length_scale = config.virial_radius().to_au();
    let velocity_scale = (G * total_mass / length_scale).sqrt();
    let collision_radius = config.initial_collision_radius();

    let stars: Vec<Star> = masses
        .iter()
        .zip(phase)
        .enumerate()
        .map(|(i, (&m, (pos, vel)))| {
            let position = Point3::from(pos * length_scale);
            Star::new(
                StarKey(i as u64),
                Mass::from_solar_masses(m),
                position,
                vel * velocity_scale,
                collision_radius,
                m > bright_threshold,
            )
        })
        .collect();

    debug!(
        n,
        total_mass_msun = total_mass,
        bright = stars.iter().filter(|s| s.bright).count(),
        "drew cluster"
    );
    stars
}
