/// Solar luminosity in erg/s
pub const LSUN_ERG_PER_S: f64 = 3.828e33;

/// Segments of the FUV fit: (lower mass bound, coefficient, exponent).
/// Each segment applies from its lower bound up to the next segment's bound.
const FUV_FIT: [(f64, f64, f64); 10] = [
    (0.12, 1.70294e16, 42.557),
    (0.24, 9.11137e-9, 3.8845),
    (0.56, 1.10021e-6, 12.237),
    (0.70, 2.38690e-4, 27.199),
    (0.91, 1.02477e-4, 18.465),
    (1.37, 9.66362e-4, 11.410),
    (2.07, 6.49335e-2, 5.6147),
    (3.72, 6.99075e-1, 3.8058),
    (10.0, 9.73664e0, 2.6620),
    (20.2, 1.31175e2, 1.7974),
];

/// FUV luminosity (L☉) of a star of the given mass.
///
/// Piecewise power-law fit `L = k · M^p` over ten mass segments. Stars at or
/// below 0.12 M☉ are treated as FUV-dark and return zero.
///
/// # Examples
///
/// ```
/// use stellar::fuv_luminosity;
/// use units::Mass;
///
/// assert_eq!(fuv_luminosity(Mass::from_solar_masses(0.1)), 0.0);
/// assert!(fuv_luminosity(Mass::from_solar_masses(20.0)) > 1e4);
/// ```
pub fn fuv_luminosity(mass: units::Mass) -> f64 {
    let m = mass.to_solar_masses();
    if m <= FUV_FIT[0].0 {
        return 0.0;
    }

    FUV_FIT
        .iter()
        .rev()
        .find(|(lower, _, _)| m >= *lower)
        .map(|(_, k, p)| k * m.powf(*p))
        .unwrap_or(0.0)
}
