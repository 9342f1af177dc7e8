//! FRIED-style mass-loss table.
//!
//! Rows map (stellar mass [M☉], FUV flux [G0], disk mass [M_Jup],
//! disk radius [AU]) to log10 of the mass-loss rate [M☉/yr]. The table is
//! loaded once and never modified.

use std::path::Path;

use units::{Length, Mass, MassRate};

use crate::error::{DiskClusterError, Result};

/// One of the four parameter axes of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    StellarMass,
    FuvFlux,
    DiskMass,
    DiskRadius,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::StellarMass,
        Axis::FuvFlux,
        Axis::DiskMass,
        Axis::DiskRadius,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassLossRow {
    pub stellar_mass: f64,
    pub fuv_flux: f64,
    pub disk_mass: f64,
    pub disk_radius: f64,
    pub log10_rate: f64,
}

impl MassLossRow {
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::StellarMass => self.stellar_mass,
            Axis::FuvFlux => self.fuv_flux,
            Axis::DiskMass => self.disk_mass,
            Axis::DiskRadius => self.disk_radius,
        }
    }

    fn point(&self) -> [f64; 4] {
        [self.stellar_mass, self.fuv_flux, self.disk_mass, self.disk_radius]
    }
}

/// A point in the table's parameter space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuvQuery {
    pub stellar_mass: Mass,
    /// Incident FUV flux (G0)
    pub fuv_flux: f64,
    pub disk_mass: Mass,
    pub disk_radius: Length,
}

impl FuvQuery {
    /// Coordinates in table units.
    pub fn point(&self) -> [f64; 4] {
        [
            self.stellar_mass.to_solar_masses(),
            self.fuv_flux,
            self.disk_mass.to_jupiter_masses(),
            self.disk_radius.to_au(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassLossGrid {
    rows: Vec<MassLossRow>,
}

impl MassLossGrid {
    pub fn new(rows: Vec<MassLossRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(DiskClusterError::MassLossGrid("table has no rows".to_string()));
        }
        if let Some(i) = rows
            .iter()
            .position(|r| r.point().iter().any(|v| !v.is_finite()) || !r.log10_rate.is_finite())
        {
            return Err(DiskClusterError::MassLossGrid(format!(
                "row {i} holds a non-finite value"
            )));
        }
        Ok(Self { rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DiskClusterError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse a whitespace-separated table.
    ///
    /// Rows of 5 columns are read as (M*, G0, M_disk, R_disk, log10 Ṁ). Rows
    /// of 6 columns follow the raw FRIED layout, whose fourth column is not
    /// used and whose sixth holds the rate. Blank lines, `#` comments and
    /// header lines that do not start with a number are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields[0].parse::<f64>().is_err() {
                continue;
            }

            let values = fields
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<std::result::Result<Vec<f64>, _>>()
                .map_err(|e| {
                    DiskClusterError::MassLossGrid(format!("line {}: {e}", n + 1))
                })?;

            let row = match values.as_slice() {
                [m, g0, md, rd, rate] => MassLossRow {
                    stellar_mass: *m,
                    fuv_flux: *g0,
                    disk_mass: *md,
                    disk_radius: *rd,
                    log10_rate: *rate,
                },
                [m, g0, md, _, rd, rate] => MassLossRow {
                    stellar_mass: *m,
                    fuv_flux: *g0,
                    disk_mass: *md,
                    disk_radius: *rd,
                    log10_rate: *rate,
                },
                other => {
                    return Err(DiskClusterError::MassLossGrid(format!(
                        "line {}: expected 5 or 6 columns, found {}",
                        n + 1,
                        other.len()
                    )))
                }
            };
            rows.push(row);
        }

        Self::new(rows)
    }

    pub fn rows(&self) -> &[MassLossRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows bracketing `value` along `axis`, as (below, above).
    ///
    /// `below` is the first row holding the largest axis value ≤ `value`,
    /// `above` the first row holding the smallest axis value ≥ `value`. A
    /// query outside the table clamps to the axis minimum or maximum, so an
    /// exact match resolves to the same row on both sides.
    pub fn bracket(&self, axis: Axis, value: f64) -> (usize, usize) {
        let column = || self.rows.iter().map(move |r| r.axis(axis));

        let min = column().fold(f64::INFINITY, f64::min);
        let max = column().fold(f64::NEG_INFINITY, f64::max);

        let below = column()
            .filter(|v| *v <= value)
            .fold(f64::NEG_INFINITY, f64::max);
        let below = if below.is_finite() { below } else { min };

        let above = column().filter(|v| *v >= value).fold(f64::INFINITY, f64::min);
        let above = if above.is_finite() { above } else { max };

        (self.first_row_with(axis, below), self.first_row_with(axis, above))
    }

    fn first_row_with(&self, axis: Axis, value: f64) -> usize {
        self.rows
            .iter()
            .position(|r| r.axis(axis) == value)
            .unwrap_or(0)
    }

    /// The eight bracketing rows of `query`, two per axis in axis order.
    pub fn bracketing_rows(&self, query: &FuvQuery) -> [usize; 8] {
        let point = query.point();
        let mut rows = [0; 8];
        for (k, axis) in Axis::ALL.iter().enumerate() {
            let (below, above) = self.bracket(*axis, point[k]);
            rows[2 * k] = below;
            rows[2 * k + 1] = above;
        }
        rows
    }

    /// log10 of the mass-loss rate at the bracketing row nearest to `query`.
    ///
    /// Distance is Euclidean in table units; ties go to the earlier row.
    pub fn nearest_log_rate(&self, query: &FuvQuery) -> f64 {
        let point = query.point();
        let mut best = self.rows[0].log10_rate;
        let mut best_distance = f64::INFINITY;

        for idx in self.bracketing_rows(query) {
            let row = &self.rows[idx];
            let distance: f64 = row
                .point()
                .iter()
                .zip(point.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            if distance < best_distance {
                best_distance = distance;
                best = row.log10_rate;
            }
        }

        best
    }

    pub fn mass_loss_rate(&self, query: &FuvQuery) -> MassRate {
        MassRate::from_log10_solar_masses_per_year(self.nearest_log_rate(query))
    }
}
