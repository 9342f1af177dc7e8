//! Grid-based viscous disk.
//!
//! Column density is stored per annulus. Cell faces are logarithmically
//! spaced between the inner and outer grid radius; each cell centre sits at
//! the geometric mean of its faces. Radii are kept in AU for comparisons and
//! in cm for the physics.

use units::{Length, Mass, MassRate, SurfaceDensity, Temperature, Time};

use super::constants::{G, K_B, MU, M_H, PI};
use crate::error::{DiskClusterError, Result};

/// Result of advancing a disk by one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveOutcome {
    Converged,
    /// The solver could not complete the interval; the grid is unchanged.
    Diverged,
}

/// Column densities (g/cm²) that delimit a disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityFloors {
    /// Cells below this are outside the disk
    pub edge: f64,
    /// Written outside a truncation radius
    pub truncation: f64,
    /// Laid under a freshly initialized profile
    pub background: f64,
}

/// Grid and solver settings shared by every disk of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    pub n_cells: usize,
    pub r_min: Length,
    pub r_max: Length,
    pub alpha: f64,
    pub temperature: Temperature,
    pub edge_density: SurfaceDensity,
    pub truncation_density: SurfaceDensity,
    pub background_density: SurfaceDensity,
    pub cfl_safety: f64,
    pub max_substeps: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            n_cells: 100,
            r_min: Length::from_au(0.05),
            r_max: Length::from_au(2000.0),
            alpha: 5e-3,
            temperature: Temperature::from_kelvin(100.0),
            edge_density: SurfaceDensity::from_grams_per_cm2(1e-10),
            truncation_density: SurfaceDensity::from_grams_per_cm2(1e-11),
            background_density: SurfaceDensity::from_grams_per_cm2(1e-12),
            cfl_safety: 0.1,
            max_substeps: 100_000,
        }
    }
}

impl GridParams {
    fn floors(&self) -> DensityFloors {
        DensityFloors {
            edge: self.edge_density.to_grams_per_cm2(),
            truncation: self.truncation_density.to_grams_per_cm2(),
            background: self.background_density.to_grams_per_cm2(),
        }
    }
}

/// Mass flux from the inner disk onto a young star,
/// log10(Ṁ / M☉ yr⁻¹) = 1.89 log10(M*/M☉) − 8.35.
pub fn accretion_rate(stellar_mass: Mass) -> MassRate {
    let log_mass = stellar_mass.to_solar_masses().log10();
    MassRate::from_log10_solar_masses_per_year(1.89 * log_mass - 8.35)
}

/// One disk's radial grid and solver state.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskGrid {
    /// Cell centres (AU)
    pub(crate) radius_au: Vec<f64>,
    /// Cell centres (cm)
    radius_cm: Vec<f64>,
    /// Cell faces (cm), one more than cells
    face_cm: Vec<f64>,
    /// Annulus areas (cm²)
    pub(crate) area: Vec<f64>,
    /// Column density (g/cm²)
    pub(crate) sigma: Vec<f64>,

    /// Central star (g)
    stellar_mass: f64,
    alpha: f64,
    /// Isothermal sound speed squared (cm²/s²)
    sound_speed_sq: f64,
    /// Prescribed outflow through the inner face (g/s)
    inner_mass_flux: f64,
    /// Mass passed through the inner face during the last `evolve` (g)
    inner_mass_out: f64,

    pub(crate) floors: DensityFloors,
    cfl_safety: f64,
    max_substeps: usize,
}

impl DiskGrid {
    /// A Keplerian log-spaced grid filled with the background density.
    pub fn keplerian(params: &GridParams, stellar_mass: Mass) -> Self {
        let faces = log_spaced_faces(params.r_min.to_au(), params.r_max.to_au(), params.n_cells);
        let radii: Vec<f64> = faces.windows(2).map(|f| (f[0] * f[1]).sqrt()).collect();
        let sigma = vec![params.background_density.to_grams_per_cm2(); radii.len()];
        Self::assemble(params, stellar_mass, radii, faces, sigma)
    }

    /// A truncated Lynden-Bell & Pringle similarity profile of characteristic
    /// radius `disk_radius` holding `disk_mass`, on top of the background.
    ///
    /// ```text
    /// Σ(r) = Σ₀ (R_d/r) exp(−r/R_d)   for r ≤ R_d
    /// Σ₀   = M_d / (2π R_d² (1 − e⁻¹))
    /// ```
    pub fn lynden_bell_pringle(
        params: &GridParams,
        stellar_mass: Mass,
        disk_radius: Length,
        disk_mass: Mass,
    ) -> Self {
        let mut grid = Self::keplerian(params, stellar_mass);
        let rc = disk_radius.to_cm();
        if rc <= 0.0 {
            return grid;
        }
        let sigma_0 = disk_mass.to_grams() / (2.0 * PI * rc * rc * (1.0 - (-1.0f64).exp()));

        for (sigma, &r) in grid.sigma.iter_mut().zip(grid.radius_cm.iter()) {
            if r <= rc {
                *sigma += sigma_0 * (rc / r) * (-r / rc).exp();
            }
        }
        grid.set_inner_mass_flux(accretion_rate(stellar_mass));
        grid
    }

    /// A grid with explicit cell centres and column densities.
    ///
    /// Interior faces sit at the geometric mean of neighbouring centres; the
    /// two outer faces mirror their neighbour in log radius.
    pub fn from_cells(
        params: &GridParams,
        stellar_mass: Mass,
        radii: &[Length],
        sigma: &[SurfaceDensity],
    ) -> Result<Self> {
        if radii.len() != sigma.len() {
            return Err(DiskClusterError::Config(format!(
                "{} radii but {} column densities",
                radii.len(),
                sigma.len()
            )));
        }
        if radii.len() < 2 {
            return Err(DiskClusterError::Config(
                "a disk grid needs at least 2 cells".to_string(),
            ));
        }
        let radii_au: Vec<f64> = radii.iter().map(Length::to_au).collect();
        if radii_au[0] <= 0.0 || radii_au.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DiskClusterError::Config(
                "cell radii must be positive and strictly increasing".to_string(),
            ));
        }

        let n = radii_au.len();
        let mut faces = Vec::with_capacity(n + 1);
        faces.push(0.0);
        faces.extend(radii_au.windows(2).map(|w| (w[0] * w[1]).sqrt()));
        faces.push(0.0);
        faces[0] = radii_au[0] * radii_au[0] / faces[1];
        faces[n] = radii_au[n - 1] * radii_au[n - 1] / faces[n - 1];

        let sigma = sigma.iter().map(SurfaceDensity::to_grams_per_cm2).collect();
        Ok(Self::assemble(params, stellar_mass, radii_au, faces, sigma))
    }

    fn assemble(
        params: &GridParams,
        stellar_mass: Mass,
        radius_au: Vec<f64>,
        face_au: Vec<f64>,
        sigma: Vec<f64>,
    ) -> Self {
        let to_cm = Length::from_au(1.0).to_cm();
        let radius_cm: Vec<f64> = radius_au.iter().map(|r| r * to_cm).collect();
        let face_cm: Vec<f64> = face_au.iter().map(|f| f * to_cm).collect();
        let area = face_cm
            .windows(2)
            .map(|f| PI * (f[1] * f[1] - f[0] * f[0]))
            .collect();
        let temperature = params.temperature.to_kelvin();

        Self {
            radius_au,
            radius_cm,
            face_cm,
            area,
            sigma,
            stellar_mass: stellar_mass.to_grams(),
            alpha: params.alpha,
            sound_speed_sq: K_B * temperature / (MU * M_H),
            inner_mass_flux: 0.0,
            inner_mass_out: 0.0,
            floors: params.floors(),
            cfl_safety: params.cfl_safety,
            max_substeps: params.max_substeps,
        }
    }

    pub fn n_cells(&self) -> usize {
        self.sigma.len()
    }

    /// Cell centres (AU)
    pub fn radii(&self) -> &[f64] {
        &self.radius_au
    }

    /// Column density per cell (g/cm²)
    pub fn column_density(&self) -> &[f64] {
        &self.sigma
    }

    /// Annulus area per cell (cm²)
    pub fn areas(&self) -> &[f64] {
        &self.area
    }

    pub fn floors(&self) -> DensityFloors {
        self.floors
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn stellar_mass(&self) -> Mass {
        Mass::from_grams(self.stellar_mass)
    }

    pub fn set_stellar_mass(&mut self, mass: Mass) {
        self.stellar_mass = mass.to_grams();
    }

    pub fn inner_mass_flux(&self) -> MassRate {
        MassRate::from_solar_masses_per_year(
            Mass::from_grams(self.inner_mass_flux * Time::from_years(1.0).to_seconds())
                .to_solar_masses(),
        )
    }

    pub fn set_inner_mass_flux(&mut self, rate: MassRate) {
        let per_year = rate.integrate(Time::from_years(1.0)).to_grams();
        self.inner_mass_flux = per_year / Time::from_years(1.0).to_seconds();
    }

    /// Mass that left through the inner face during the last `evolve`.
    pub fn inner_mass_out(&self) -> Mass {
        Mass::from_grams(self.inner_mass_out)
    }

    /// Mass of every cell on the grid.
    pub fn total_mass(&self) -> Mass {
        Mass::from_grams(self.sigma.iter().zip(&self.area).map(|(s, a)| s * a).sum())
    }

    // =========================================================================
    // Viscous evolution
    // =========================================================================

    /// Advance the column density by `dt`.
    ///
    /// Conservative finite-volume form of
    /// ```text
    /// ∂Σ/∂t = (3/r) ∂/∂r [r^(1/2) ∂/∂r (ν Σ r^(1/2))]
    /// ```
    /// with ν = α c_s²/Ω. The outer face is closed; the inner face removes
    /// the prescribed accretion rate, limited to what the innermost cell
    /// holds. The interval is split into equal sub-steps below the diffusive
    /// stability limit; needing more than the configured maximum, or
    /// producing a non-finite cell, leaves the grid untouched and reports
    /// [`EvolveOutcome::Diverged`].
    pub fn evolve(&mut self, dt: Time) -> EvolveOutcome {
        let dt_s = dt.to_seconds();
        self.inner_mass_out = 0.0;

        if !dt_s.is_finite() || dt_s < 0.0 {
            return EvolveOutcome::Diverged;
        }
        if dt_s == 0.0 {
            return EvolveOutcome::Converged;
        }

        let nu = self.viscosity();
        let limit = self.max_timestep(&nu);
        let substeps = (dt_s / limit).ceil().max(1.0);
        if !substeps.is_finite() || substeps > self.max_substeps as f64 {
            return EvolveOutcome::Diverged;
        }
        let n_sub = substeps as usize;
        let h = dt_s / n_sub as f64;

        let backup = self.sigma.clone();
        let mut accreted = 0.0;
        for _ in 0..n_sub {
            accreted += self.substep(&nu, h);
        }

        if self.sigma.iter().any(|s| !s.is_finite()) || !accreted.is_finite() {
            self.sigma = backup;
            return EvolveOutcome::Diverged;
        }

        self.inner_mass_out = accreted;
        EvolveOutcome::Converged
    }

    /// One explicit update of length `h` seconds. Returns the mass accreted
    /// through the inner face (g).
    fn substep(&mut self, nu: &[f64], h: f64) -> f64 {
        let n = self.sigma.len();

        // X = ν Σ r^(1/2)
        let x: Vec<f64> = (0..n)
            .map(|i| nu[i] * self.sigma[i] * self.radius_cm[i].sqrt())
            .collect();

        // Inward mass flow through each face: 6π r^(1/2) ∂X/∂r
        let mut inflow = vec![0.0; n + 1];
        for f in 1..n {
            let dx_dr = (x[f] - x[f - 1]) / (self.radius_cm[f] - self.radius_cm[f - 1]);
            inflow[f] = 6.0 * PI * self.face_cm[f].sqrt() * dx_dr;
        }

        let available = self.sigma[0] * self.area[0] + inflow[1] * h;
        let accreted = (self.inner_mass_flux * h).min(available).max(0.0);
        inflow[0] = accreted / h;

        for i in 0..n {
            let dm = (inflow[i + 1] - inflow[i]) * h;
            self.sigma[i] = (self.sigma[i] + dm / self.area[i]).max(0.0);
        }

        accreted
    }

    /// Kinematic viscosity at each cell centre (cm²/s).
    fn viscosity(&self) -> Vec<f64> {
        self.radius_cm
            .iter()
            .map(|&r| {
                let omega = (G * self.stellar_mass / (r * r * r)).sqrt();
                self.alpha * self.sound_speed_sq / omega
            })
            .collect()
    }

    /// Largest stable explicit step (s): safety × min(Δr² / 6ν).
    fn max_timestep(&self, nu: &[f64]) -> f64 {
        self.face_cm
            .windows(2)
            .zip(nu)
            .map(|(f, nu)| {
                let dr = f[1] - f[0];
                self.cfl_safety * dr * dr / (6.0 * nu)
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// `n + 1` logarithmically spaced cell faces between `r_min` and `r_max`.
fn log_spaced_faces(r_min: f64, r_max: f64, n: usize) -> Vec<f64> {
    let log_min = r_min.ln();
    let log_max = r_max.ln();

    (0..=n)
        .map(|i| {
            let frac = i as f64 / n as f64;
            (log_min + frac * (log_max - log_min)).exp()
        })
        .collect()
}
