use approx::assert_relative_eq;
use proptest::prelude::*;
use units::{Length, Mass, SurfaceDensity};

use crate::disk::{DiskGrid, GridParams};

const EDGE: f64 = 1e-10;

/// Five cells at 1..5 AU; the last two are below the default edge density.
fn stepped_disk() -> DiskGrid {
    disk_from(&[10.0, 5.0, 1.0, 1e-12, 1e-12])
}

fn disk_from(sigma: &[f64]) -> DiskGrid {
    let radii: Vec<Length> = (1..=sigma.len()).map(|r| Length::from_au(r as f64)).collect();
    let sigma: Vec<SurfaceDensity> = sigma
        .iter()
        .map(|&s| SurfaceDensity::from_grams_per_cm2(s))
        .collect();
    DiskGrid::from_cells(&GridParams::default(), Mass::from_solar_masses(1.0), &radii, &sigma)
        .unwrap()
}

fn cell_mass(grid: &DiskGrid, i: usize) -> f64 {
    grid.column_density()[i] * grid.areas()[i]
}

fn floor(value: f64) -> SurfaceDensity {
    SurfaceDensity::from_grams_per_cm2(value)
}

#[test]
fn test_disk_radius_stops_at_first_cell_below_floor() {
    let grid = stepped_disk();

    assert_eq!(grid.edge_index(floor(EDGE)), 2);
    assert_eq!(grid.radius(), Length::from_au(3.0));
    assert_eq!(grid.disk_radius(floor(2.0)), Length::from_au(2.0));
}

#[test]
fn test_disk_radius_ignores_outer_ring() {
    // A ring beyond a gap does not extend the disk
    let grid = disk_from(&[10.0, 1e-12, 10.0, 10.0]);
    assert_eq!(grid.radius(), Length::from_au(1.0));
}

#[test]
fn test_disk_radius_whole_grid() {
    let grid = disk_from(&[10.0, 5.0, 1.0]);
    assert_eq!(grid.radius(), Length::from_au(3.0));
}

#[test]
fn test_depleted_disk_is_degenerate() {
    let grid = disk_from(&[1e-12, 1e-12, 1e-12]);

    assert_eq!(grid.edge_index(floor(EDGE)), 0);
    assert_eq!(grid.radius(), Length::from_au(1.0));
    assert_eq!(grid.mean_density(floor(EDGE)), SurfaceDensity::zero());
}

#[test]
fn test_disk_mass_counts_cells_inside_radius() {
    let grid = stepped_disk();
    let expected = cell_mass(&grid, 0) + cell_mass(&grid, 1) + cell_mass(&grid, 2);

    assert_relative_eq!(grid.mass().to_grams(), expected, max_relative = 1e-12);
    assert_relative_eq!(
        grid.disk_mass(Length::from_au(1.5)).to_grams(),
        cell_mass(&grid, 0),
        max_relative = 1e-12
    );
    assert_eq!(grid.disk_mass(Length::from_au(0.5)), Mass::zero());
}

#[test]
fn test_mean_density_excludes_edge_cell() {
    let grid = stepped_disk();
    assert_relative_eq!(grid.mean_density(floor(EDGE)).to_grams_per_cm2(), 7.5);
}

#[test]
fn test_truncate_sets_outer_cells_to_floor() {
    let mut grid = stepped_disk();
    grid.truncate(Length::from_au(2.0), floor(1e-11));

    assert_eq!(grid.column_density(), &[10.0, 5.0, 1e-11, 1e-11, 1e-11]);
    assert_eq!(grid.radius(), Length::from_au(2.0));
}

#[test]
fn test_truncate_outside_disk_keeps_mass() {
    let mut grid = stepped_disk();
    let mass = grid.mass();

    grid.truncate(Length::from_au(3.0), floor(1e-11));
    assert_eq!(grid.mass(), mass);

    grid.truncate(Length::from_au(10.0), floor(1e-11));
    assert_eq!(grid.mass(), mass);
}

#[test]
fn test_evaporate_within_edge_cell() {
    let mut grid = stepped_disk();
    let target = Mass::from_grams(0.5 * cell_mass(&grid, 2));

    let radius = grid.evaporate(target);

    assert_eq!(radius, Some(Length::from_au(3.0)));
    assert_eq!(grid.radius(), Length::from_au(3.0));
}

#[test]
fn test_evaporate_sweeps_inward() {
    let mut grid = stepped_disk();
    let target = Mass::from_grams(cell_mass(&grid, 2) + 0.5 * cell_mass(&grid, 1));

    let radius = grid.evaporate(target);

    assert_eq!(radius, Some(Length::from_au(2.0)));
    assert_eq!(grid.column_density()[2], 1e-11);
    assert_eq!(grid.radius(), Length::from_au(2.0));
}

#[test]
fn test_evaporate_more_than_disk_holds() {
    let mut grid = stepped_disk();
    let before = grid.clone();
    let target = grid.mass() * 2.0;

    assert_eq!(grid.evaporate(target), None);
    assert_eq!(grid, before);
}

proptest! {
    #[test]
    fn lower_floor_never_shrinks_radius(
        sigma in prop::collection::vec(0.0f64..100.0, 2..40),
        a in 1e-3f64..100.0,
        b in 1e-3f64..100.0,
    ) {
        let grid = disk_from(&sigma);
        let (low, high) = if a < b { (a, b) } else { (b, a) };

        prop_assert!(grid.disk_radius(floor(low)) >= grid.disk_radius(floor(high)));
    }

    #[test]
    fn evaporate_never_grows_disk(
        sigma in prop::collection::vec(0.0f64..100.0, 2..40),
        fraction in 0.0f64..2.0,
    ) {
        let mut grid = disk_from(&sigma);
        let radius = grid.radius();
        let mass = grid.mass();
        let target = mass * fraction;

        match grid.evaporate(target) {
            Some(new_radius) => {
                prop_assert!(new_radius <= radius);
                prop_assert!(grid.radius() <= radius);
            }
            None => prop_assert!(mass < target),
        }
    }
}
