//! Radiation fields of the bright stars.

use stellar::LSUN_ERG_PER_S;
use units::{Length, MassRate};

use crate::disk::constants::PI;

/// Habing flux in erg s⁻¹ cm⁻²; one G0.
pub const G0_FLUX: f64 = 1.6e-3;

/// Flux (erg s⁻¹ cm⁻²) at `distance` from a source of luminosity `luminosity` (L☉).
pub fn flux_at_distance(luminosity: f64, distance: Length) -> f64 {
    let d = distance.to_cm();
    luminosity * LSUN_ERG_PER_S / (4.0 * PI * d * d)
}

/// FUV flux in units of G0 at `distance` from a source of `luminosity` (L☉).
pub fn fuv_flux_g0(luminosity: f64, distance: Length) -> f64 {
    flux_at_distance(luminosity, distance) / G0_FLUX
}

/// Distance inside which a disk of radius `disk_radius` is EUV-dominated
/// (Johnstone, Hollenbach & Bally 1998):
/// d_min = 5×10¹⁷ · 0.25 · √(R_d / 10¹⁴ cm) cm.
pub fn euv_distance(disk_radius: Length) -> Length {
    let r14 = disk_radius.to_cm() / 1e14;
    Length::from_cm(5e17 * 0.25 * r14.max(0.0).sqrt())
}

/// EUV photoevaporation rate, Ṁ = 2×10⁻⁹ · 3 · 4.12 · (R_d / 10¹⁴ cm) M☉/yr.
pub fn euv_mass_loss_rate(disk_radius: Length) -> MassRate {
    let r14 = disk_radius.to_cm() / 1e14;
    MassRate::from_solar_masses_per_year(2e-9 * 3.0 * 4.12 * r14)
}
