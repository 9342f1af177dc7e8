use rand::Rng;
use rand_chacha::ChaChaRng;

/// Sample from a power-law distribution
///
/// Samples from p(x) ∝ x^α between x_min and x_max using inverse transform sampling.
///
/// # Arguments
/// * `x_min` - Minimum value
/// * `x_max` - Maximum value
/// * `alpha` - Power-law exponent (e.g., -2.3 for Salpeter IMF)
/// * `rng` - Random number generator
///
/// # Returns
/// A sample from the power-law distribution
pub fn sample_power_law(x_min: f64, x_max: f64, alpha: f64, rng: &mut ChaChaRng) -> f64 {
    let u: f64 = rng.random();
    let alpha1 = alpha + 1.0;
    (u * (x_max.powf(alpha1) - x_min.powf(alpha1)) + x_min.powf(alpha1)).powf(1.0 / alpha1)
}

/// Kroupa (2001) mass boundaries (M☉) and slopes
const KROUPA_BOUNDARIES: [f64; 4] = [0.01, 0.08, 0.5, f64::INFINITY];
const KROUPA_SLOPES: [f64; 3] = [-0.3, -1.3, -2.3];

/// Sample stellar mass from the Kroupa (2001) Initial Mass Function
///
/// The Kroupa IMF is a broken power law:
/// - 0.01 ≤ M < 0.08 M☉: α = -0.3
/// - 0.08 ≤ M < 0.5 M☉: α = -1.3
/// - M ≥ 0.5 M☉: α = -2.3
///
/// Segments are chosen with probabilities proportional to their integrated
/// weight, with the power laws joined continuously at the break masses.
///
/// # Arguments
/// * `rng` - Random number generator
/// * `max_mass` - Upper mass limit in solar masses
///
/// # Returns
/// Stellar mass in solar masses
pub fn sample_mass_kroupa(rng: &mut ChaChaRng, max_mass: f64) -> f64 {
    let segments = kroupa_segments(max_mass);
    let total: f64 = segments.iter().map(|(_, _, _, w)| w).sum();
    let mut pick: f64 = rng.random::<f64>() * total;

    for (lo, hi, alpha, weight) in &segments {
        if pick < *weight {
            return sample_power_law(*lo, *hi, *alpha, rng);
        }
        pick -= weight;
    }

    // Rounding left `pick` at the very top of the range
    match segments.last() {
        Some((lo, hi, alpha, _)) => sample_power_law(*lo, *hi, *alpha, rng),
        None => max_mass,
    }
}

/// (lower, upper, slope, integrated weight) for every non-empty segment below `max_mass`.
fn kroupa_segments(max_mass: f64) -> Vec<(f64, f64, f64, f64)> {
    let mut segments = Vec::with_capacity(KROUPA_SLOPES.len());
    // Continuity factor so that adjacent segments meet at the break mass
    let mut norm = 1.0;

    for (i, alpha) in KROUPA_SLOPES.iter().enumerate() {
        let lo = KROUPA_BOUNDARIES[i];
        let hi = KROUPA_BOUNDARIES[i + 1].min(max_mass);
        if i > 0 {
            let prev_alpha = KROUPA_SLOPES[i - 1];
            norm *= lo.powf(prev_alpha - alpha);
        }
        if hi <= lo {
            break;
        }
        let alpha1 = alpha + 1.0;
        let weight = norm * (hi.powf(alpha1) - lo.powf(alpha1)) / alpha1;
        segments.push((lo, hi, *alpha, weight));
    }

    segments
}
