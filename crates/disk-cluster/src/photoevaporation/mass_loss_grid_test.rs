use approx::assert_relative_eq;
use units::{Length, Mass};

use crate::error::DiskClusterError;
use crate::photoevaporation::{Axis, FuvQuery, MassLossGrid};

const TABLE: &str = "\
# M*  G0  Md  Rd  log10 Mdot
M_star G0 M_disk R_disk Mdot
0.5 10 1 50 -9
0.5 10 1 100 -8
0.5 100 1 50 -7
0.5 100 1 100 -6

1.0 10 1 50 -8.5
1.0 10 1 100 -7.5
1.0 100 1 50 -6.5
1.0 100 1 100 -5.5
";

fn query(m: f64, g0: f64, md: f64, rd: f64) -> FuvQuery {
    FuvQuery {
        stellar_mass: Mass::from_solar_masses(m),
        fuv_flux: g0,
        disk_mass: Mass::from_jupiter_masses(md),
        disk_radius: Length::from_au(rd),
    }
}

#[test]
fn test_parse_skips_comments_and_headers() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(grid.len(), 8);
    assert_eq!(grid.rows()[1].disk_radius, 100.0);
    assert_eq!(grid.rows()[7].log10_rate, -5.5);
}

#[test]
fn test_parse_six_column_layout() {
    let grid = MassLossGrid::parse("0.5 10 1 999 50 -9\n1.0 10 1 999 100 -8\n").unwrap();

    let row = grid.rows()[0];
    assert_eq!(row.disk_mass, 1.0);
    assert_eq!(row.disk_radius, 50.0);
    assert_eq!(row.log10_rate, -9.0);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        MassLossGrid::parse("0.5 10 1 50\n"),
        Err(DiskClusterError::MassLossGrid(_))
    ));
    assert!(matches!(
        MassLossGrid::parse("0.5 ten 1 50 -9\n"),
        Err(DiskClusterError::MassLossGrid(_))
    ));
    assert!(matches!(
        MassLossGrid::parse("# only a comment\n"),
        Err(DiskClusterError::MassLossGrid(_))
    ));
}

#[test]
fn test_exact_match_brackets_same_row() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(grid.bracket(Axis::StellarMass, 1.0), (4, 4));
    assert_eq!(grid.bracket(Axis::DiskRadius, 100.0), (1, 1));
    assert_eq!(grid.bracket(Axis::DiskMass, 1.0), (0, 0));
}

#[test]
fn test_bracket_between_rows() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(grid.bracket(Axis::StellarMass, 0.7), (0, 4));
    assert_eq!(grid.bracket(Axis::FuvFlux, 50.0), (0, 2));
}

#[test]
fn test_bracket_clamps_outside_table() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(grid.bracket(Axis::FuvFlux, 1e4), (2, 2));
    assert_eq!(grid.bracket(Axis::FuvFlux, 0.0), (0, 0));
    assert_eq!(grid.bracket(Axis::DiskRadius, 5000.0), (1, 1));
}

#[test]
fn test_bracketing_rows_in_axis_order() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(
        grid.bracketing_rows(&query(0.7, 50.0, 1.0, 75.0)),
        [0, 4, 0, 2, 0, 0, 0, 1]
    );
}

#[test]
fn test_nearest_row() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    assert_eq!(grid.nearest_log_rate(&query(0.5, 10.0, 1.0, 50.0)), -9.0);
    assert_eq!(grid.nearest_log_rate(&query(0.5, 10.0, 1.0, 60.0)), -9.0);
    assert_eq!(grid.nearest_log_rate(&query(0.5, 10.0, 1.0, 90.0)), -8.0);
    // Out of range along every axis still finds a row
    assert!(grid.nearest_log_rate(&query(50.0, 1e6, 1e3, 1e4)).is_finite());
}

#[test]
fn test_nearest_row_tie_goes_to_first() {
    let grid = MassLossGrid::parse(TABLE).unwrap();

    // Equidistant from the 50 and 100 au rows
    assert_eq!(grid.nearest_log_rate(&query(0.5, 10.0, 1.0, 75.0)), -9.0);
}

#[test]
fn test_mass_loss_rate() {
    let grid = MassLossGrid::parse(TABLE).unwrap();
    let rate = grid.mass_loss_rate(&query(0.5, 10.0, 1.0, 50.0));

    assert_relative_eq!(rate.to_solar_masses_per_year(), 1e-9, max_relative = 1e-12);
}
