//! Run configuration.
//!
//! Every tunable of a cluster run lives in [`SimulationConfig`]. Values are
//! stored as plain numbers with their unit in the field name so the JSON file
//! reads naturally; accessors return typed quantities.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};
use units::{Length, Mass, SurfaceDensity, Temperature, Time};

use crate::disk::GridParams;
use crate::error::{DiskClusterError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub cluster: ClusterConfig,
    pub gravity: GravityConfig,
    pub disk: DiskConfig,
    pub time: TimeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub n_stars: usize,
    pub virial_radius_pc: f64,
    pub virial_ratio: f64,
    pub seed: u64,
    /// Stars above this mass carry no disk and irradiate the others
    pub bright_star_mass_msun: f64,
    pub max_stellar_mass_msun: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub initial_collision_radius_pc: f64,
    pub softening_au: f64,
    pub timestep_parameter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub alpha: f64,
    pub n_cells: usize,
    pub r_min_au: f64,
    pub r_max_au: f64,
    pub temperature_k: f64,
    /// Column density marking the disk edge (g/cm²)
    pub edge_density: f64,
    /// Column density left outside a truncation radius (g/cm²)
    pub truncation_density: f64,
    /// Column density laid under the initial profile (g/cm²)
    pub background_density: f64,
    /// Mean column density at or below which a disk counts as dispersed (g/cm²)
    pub dispersion_density: f64,
    pub min_disk_radius_au: f64,
    pub min_disk_mass_mearth: f64,
    pub cfl_safety: f64,
    pub max_substeps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub t_ini_yr: f64,
    pub dt_yr: f64,
    pub t_end_myr: f64,
    pub save_interval_yr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub mass_loss_grid: PathBuf,
    pub directory: PathBuf,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            n_stars: 100,
            virial_radius_pc: 0.25,
            virial_ratio: 0.5,
            seed: 42,
            bright_star_mass_msun: 1.9,
            max_stellar_mass_msun: 100.0,
        }
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            initial_collision_radius_pc: 0.02,
            softening_au: 100.0,
            timestep_parameter: 0.01,
        }
    }
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            alpha: 5e-3,
            n_cells: 100,
            r_min_au: 0.05,
            r_max_au: 2000.0,
            temperature_k: 100.0,
            edge_density: 1e-10,
            truncation_density: 1e-11,
            background_density: 1e-12,
            dispersion_density: 1e-5,
            min_disk_radius_au: 0.5,
            min_disk_mass_mearth: 0.03,
            cfl_safety: 0.1,
            max_substeps: 100_000,
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            t_ini_yr: 0.0,
            dt_yr: 1000.0,
            t_end_myr: 2.0,
            save_interval_yr: 50_000.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mass_loss_grid: PathBuf::from("data/friedgrid.dat"),
            directory: PathBuf::from("results"),
        }
    }
}

/// Command-line overrides for individual configuration fields.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct ConfigOverrides {
    /// Number of stars
    #[arg(short, long)]
    pub n_stars: Option<usize>,

    /// Virial radius in parsec
    #[arg(long)]
    pub virial_radius: Option<f64>,

    /// Virial ratio
    #[arg(long)]
    pub virial_ratio: Option<f64>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Viscosity parameter
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Number of disk grid cells
    #[arg(long)]
    pub n_cells: Option<usize>,

    /// Start time in years
    #[arg(long)]
    pub t_ini: Option<f64>,

    /// Time step in years
    #[arg(long)]
    pub dt: Option<f64>,

    /// End time in Myr
    #[arg(long)]
    pub t_end: Option<f64>,

    /// Snapshot interval in years
    #[arg(long)]
    pub save_interval: Option<f64>,

    /// Photoevaporation mass-loss table
    #[arg(long, env = "DISK_CLUSTER_GRID")]
    pub mass_loss_grid: Option<PathBuf>,

    /// Output directory for snapshots and the run summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Overwrite every field of `config` that was given on the command line.
    pub fn apply(&self, config: &mut SimulationConfig) {
        let cluster = &mut config.cluster;
        if let Some(n) = self.n_stars {
            cluster.n_stars = n;
        }
        if let Some(r) = self.virial_radius {
            cluster.virial_radius_pc = r;
        }
        if let Some(q) = self.virial_ratio {
            cluster.virial_ratio = q;
        }
        if let Some(seed) = self.seed {
            cluster.seed = seed;
        }

        if let Some(alpha) = self.alpha {
            config.disk.alpha = alpha;
        }
        if let Some(n) = self.n_cells {
            config.disk.n_cells = n;
        }

        let time = &mut config.time;
        if let Some(t) = self.t_ini {
            time.t_ini_yr = t;
        }
        if let Some(dt) = self.dt {
            time.dt_yr = dt;
        }
        if let Some(t) = self.t_end {
            time.t_end_myr = t;
        }
        if let Some(every) = self.save_interval {
            time.save_interval_yr = every;
        }

        if let Some(path) = &self.mass_loss_grid {
            config.output.mass_loss_grid = path.clone();
        }
        if let Some(dir) = &self.output {
            config.output.directory = dir.clone();
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DiskClusterError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run can proceed with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DiskClusterError::Config(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        let c = &self.cluster;
        if c.n_stars < 2 {
            return Err(DiskClusterError::Config(format!(
                "a cluster needs at least 2 stars, got {}",
                c.n_stars
            )));
        }
        positive("cluster.virial_radius_pc", c.virial_radius_pc)?;
        positive("cluster.virial_ratio", c.virial_ratio)?;
        positive("cluster.bright_star_mass_msun", c.bright_star_mass_msun)?;
        if c.max_stellar_mass_msun <= c.bright_star_mass_msun {
            return Err(DiskClusterError::Config(format!(
                "cluster.max_stellar_mass_msun ({}) must exceed the bright-star mass ({})",
                c.max_stellar_mass_msun, c.bright_star_mass_msun
            )));
        }

        let g = &self.gravity;
        positive("gravity.initial_collision_radius_pc", g.initial_collision_radius_pc)?;
        positive("gravity.timestep_parameter", g.timestep_parameter)?;
        if !(g.softening_au.is_finite() && g.softening_au >= 0.0) {
            return Err(DiskClusterError::Config(format!(
                "gravity.softening_au must be non-negative, got {}",
                g.softening_au
            )));
        }

        let d = &self.disk;
        if d.n_cells < 2 {
            return Err(DiskClusterError::Config(format!(
                "disk.n_cells must be at least 2, got {}",
                d.n_cells
            )));
        }
        positive("disk.alpha", d.alpha)?;
        positive("disk.r_min_au", d.r_min_au)?;
        if d.r_max_au <= d.r_min_au {
            return Err(DiskClusterError::Config(format!(
                "disk.r_max_au ({}) must exceed disk.r_min_au ({})",
                d.r_max_au, d.r_min_au
            )));
        }
        positive("disk.temperature_k", d.temperature_k)?;
        positive("disk.edge_density", d.edge_density)?;
        positive("disk.dispersion_density", d.dispersion_density)?;
        positive("disk.cfl_safety", d.cfl_safety)?;
        if d.truncation_density < 0.0 || d.background_density < 0.0 {
            return Err(DiskClusterError::Config(
                "disk density floors must be non-negative".to_string(),
            ));
        }
        if d.truncation_density >= d.edge_density || d.background_density >= d.edge_density {
            return Err(DiskClusterError::Config(format!(
                "disk density floors must lie below the edge density ({})",
                d.edge_density
            )));
        }
        if d.max_substeps == 0 {
            return Err(DiskClusterError::Config(
                "disk.max_substeps must be at least 1".to_string(),
            ));
        }

        let t = &self.time;
        positive("time.dt_yr", t.dt_yr)?;
        positive("time.save_interval_yr", t.save_interval_yr)?;
        if t.t_end_myr * 1.0e6 <= t.t_ini_yr {
            return Err(DiskClusterError::Config(format!(
                "time.t_end_myr ({}) must come after time.t_ini_yr ({})",
                t.t_end_myr, t.t_ini_yr
            )));
        }

        Ok(())
    }

    pub fn grid_params(&self) -> GridParams {
        let d = &self.disk;
        GridParams {
            n_cells: d.n_cells,
            r_min: Length::from_au(d.r_min_au),
            r_max: Length::from_au(d.r_max_au),
            alpha: d.alpha,
            temperature: Temperature::from_kelvin(d.temperature_k),
            edge_density: SurfaceDensity::from_grams_per_cm2(d.edge_density),
            truncation_density: SurfaceDensity::from_grams_per_cm2(d.truncation_density),
            background_density: SurfaceDensity::from_grams_per_cm2(d.background_density),
            cfl_safety: d.cfl_safety,
            max_substeps: d.max_substeps,
        }
    }

    pub fn bright_star_mass(&self) -> Mass {
        Mass::from_solar_masses(self.cluster.bright_star_mass_msun)
    }

    pub fn virial_radius(&self) -> Length {
        Length::from_parsecs(self.cluster.virial_radius_pc)
    }

    pub fn initial_collision_radius(&self) -> Length {
        Length::from_parsecs(self.gravity.initial_collision_radius_pc)
    }

    pub fn min_disk_radius(&self) -> Length {
        Length::from_au(self.disk.min_disk_radius_au)
    }

    pub fn min_disk_mass(&self) -> Mass {
        Mass::from_earth_masses(self.disk.min_disk_mass_mearth)
    }

    pub fn dispersion_density(&self) -> SurfaceDensity {
        SurfaceDensity::from_grams_per_cm2(self.disk.dispersion_density)
    }

    pub fn t_ini(&self) -> Time {
        Time::from_years(self.time.t_ini_yr)
    }

    pub fn dt(&self) -> Time {
        Time::from_years(self.time.dt_yr)
    }

    pub fn t_end(&self) -> Time {
        Time::from_myr(self.time.t_end_myr)
    }

    pub fn save_interval(&self) -> Time {
        Time::from_years(self.time.save_interval_yr)
    }
}
