use approx::assert_relative_eq;
use units::{Length, Mass, MassRate, SurfaceDensity, Time};

use crate::disk::{accretion_rate, DiskGrid, EvolveOutcome, GridParams};

fn solar_disk() -> DiskGrid {
    DiskGrid::lynden_bell_pringle(
        &GridParams::default(),
        Mass::from_solar_masses(1.0),
        Length::from_au(100.0),
        Mass::from_solar_masses(0.1),
    )
}

#[test]
fn test_keplerian_grid_layout() {
    let params = GridParams::default();
    let grid = DiskGrid::keplerian(&params, Mass::from_solar_masses(1.0));

    assert_eq!(grid.n_cells(), 100);
    let radii = grid.radii();
    assert!(radii[0] > 0.05);
    assert!(radii[99] < 2000.0);
    assert!(radii.windows(2).all(|w| w[1] > w[0]));

    // Constant ratio between neighbouring cells
    let ratio = radii[1] / radii[0];
    assert_relative_eq!(radii[51] / radii[50], ratio, max_relative = 1e-10);

    assert!(grid
        .column_density()
        .iter()
        .all(|&s| s == params.background_density.to_grams_per_cm2()));
    assert!(grid.areas().iter().all(|&a| a > 0.0));
}

#[test]
fn test_lynden_bell_pringle_mass() {
    let grid = solar_disk();

    assert_relative_eq!(grid.total_mass().to_solar_masses(), 0.1, max_relative = 0.1);
    assert_relative_eq!(grid.mass().to_solar_masses(), 0.1, max_relative = 0.1);
}

#[test]
fn test_lynden_bell_pringle_radius() {
    let grid = solar_disk();
    let radius = grid.radius().to_au();

    // Profile is cut at the characteristic radius
    assert!(radius <= 100.0);
    assert!(radius > 80.0);
}

#[test]
fn test_profile_decreases_outward() {
    let grid = solar_disk();
    let edge = grid.edge_index(grid.edge_density());
    let sigma = grid.column_density();

    assert!(sigma[..=edge].windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_accretion_rate() {
    let rate = accretion_rate(Mass::from_solar_masses(1.0));
    assert_relative_eq!(rate.to_solar_masses_per_year(), 10f64.powf(-8.35), max_relative = 1e-12);

    let heavier = accretion_rate(Mass::from_solar_masses(2.0));
    assert_relative_eq!(
        heavier.to_solar_masses_per_year() / rate.to_solar_masses_per_year(),
        2f64.powf(1.89),
        max_relative = 1e-10
    );
}

#[test]
fn test_inner_mass_flux_round_trip() {
    let mut grid = solar_disk();
    grid.set_inner_mass_flux(MassRate::from_solar_masses_per_year(3e-9));

    assert_relative_eq!(grid.inner_mass_flux().to_solar_masses_per_year(), 3e-9, max_relative = 1e-10);
}

#[test]
fn test_evolve_conserves_mass_without_accretion() {
    let mut grid = solar_disk();
    grid.set_inner_mass_flux(MassRate::zero());
    let before = grid.total_mass().to_grams();

    let outcome = grid.evolve(Time::from_years(1000.0));

    assert_eq!(outcome, EvolveOutcome::Converged);
    assert_relative_eq!(grid.total_mass().to_grams(), before, max_relative = 1e-6);
    assert_eq!(grid.inner_mass_out(), Mass::zero());
}

#[test]
fn test_evolve_accretes_through_inner_face() {
    let mut grid = solar_disk();
    let before = grid.total_mass().to_grams();

    let outcome = grid.evolve(Time::from_years(1000.0));

    assert_eq!(outcome, EvolveOutcome::Converged);
    let accreted = grid.inner_mass_out().to_grams();
    assert!(accreted > 0.0);
    assert_relative_eq!(grid.total_mass().to_grams(), before - accreted, max_relative = 1e-6);

    // Never more than the prescribed rate
    let limit = accretion_rate(Mass::from_solar_masses(1.0))
        .integrate(Time::from_years(1000.0))
        .to_grams();
    assert!(accreted <= limit * (1.0 + 1e-9));
}

#[test]
fn test_evolve_spreads_disk() {
    let mut grid = solar_disk();
    let radius = grid.radius();

    for _ in 0..20 {
        assert_eq!(grid.evolve(Time::from_years(1000.0)), EvolveOutcome::Converged);
    }

    assert!(grid.radius() >= radius);
}

#[test]
fn test_evolve_zero_interval() {
    let mut grid = solar_disk();
    let before = grid.clone();

    assert_eq!(grid.evolve(Time::zero()), EvolveOutcome::Converged);
    assert_eq!(grid, before);
}

#[test]
fn test_evolve_negative_interval_diverges() {
    let mut grid = solar_disk();
    let sigma = grid.column_density().to_vec();

    assert_eq!(grid.evolve(Time::from_years(-1.0)), EvolveOutcome::Diverged);
    assert_eq!(grid.column_density(), sigma.as_slice());
}

#[test]
fn test_evolve_diverges_past_substep_limit() {
    let params = GridParams {
        max_substeps: 1,
        ..GridParams::default()
    };
    let mut grid = DiskGrid::lynden_bell_pringle(
        &params,
        Mass::from_solar_masses(1.0),
        Length::from_au(100.0),
        Mass::from_solar_masses(0.1),
    );
    let sigma = grid.column_density().to_vec();

    assert_eq!(grid.evolve(Time::from_years(1000.0)), EvolveOutcome::Diverged);
    assert_eq!(grid.column_density(), sigma.as_slice());
    assert_eq!(grid.inner_mass_out(), Mass::zero());
}

#[test]
fn test_from_cells_rejects_bad_input() {
    let params = GridParams::default();
    let star = Mass::from_solar_masses(1.0);
    let radii = [Length::from_au(1.0), Length::from_au(2.0)];
    let sigma = [SurfaceDensity::from_grams_per_cm2(1.0)];

    assert!(DiskGrid::from_cells(&params, star, &radii, &sigma).is_err());

    let unordered = [Length::from_au(2.0), Length::from_au(1.0)];
    let sigma = [SurfaceDensity::from_grams_per_cm2(1.0); 2];
    assert!(DiskGrid::from_cells(&params, star, &unordered, &sigma).is_err());

    assert!(DiskGrid::from_cells(&params, star, &radii[..1], &sigma[..1]).is_err());
}

#[test]
fn test_from_cells_faces_bracket_centres() {
    let radii: Vec<Length> = [1.0, 2.0, 4.0, 8.0].iter().map(|&r| Length::from_au(r)).collect();
    let sigma = vec![SurfaceDensity::from_grams_per_cm2(1.0); 4];
    let grid = DiskGrid::from_cells(&GridParams::default(), Mass::from_solar_masses(1.0), &radii, &sigma)
        .unwrap();

    // Faces at √2, 2√2, 4√2 AU inside; mirrored outside
    let au = Length::from_au(1.0).to_cm();
    let expected_area = std::f64::consts::PI * ((2.0 * 2f64.sqrt() * au).powi(2) - (2f64.sqrt() * au).powi(2));
    assert_relative_eq!(grid.areas()[1], expected_area, max_relative = 1e-12);
    assert_relative_eq!(grid.areas()[2] / grid.areas()[1], 4.0, max_relative = 1e-12);
}
