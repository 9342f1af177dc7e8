//! Mutable state of a run: the star population, the disk registry and the
//! running statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use units::{Length, Mass, Time};

use crate::config::SimulationConfig;
use crate::disk::DiskGrid;
use crate::error::Result;
use crate::registry::{DiskRegistry, RetirementCause};
use crate::star::{index_of, Star, StarKey};

/// Running totals kept across the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub steps: u64,
    /// Encounters in which at least one disk took part
    pub encounters: u64,
    pub truncating_encounters: u64,
    pub supernovae: u64,
    pub retirements: BTreeMap<RetirementCause, u64>,
}

impl RunStats {
    pub fn retired(&self) -> u64 {
        self.retirements.values().sum()
    }
}

/// The star population, its disks and the model clock.
#[derive(Debug)]
pub struct SimulationState {
    pub time: Time,
    pub stars: Vec<Star>,
    pub registry: DiskRegistry,
    pub stats: RunStats,
}

impl SimulationState {
    pub fn new(time: Time, stars: Vec<Star>, registry: DiskRegistry) -> Self {
        Self {
            time,
            stars,
            registry,
            stats: RunStats::default(),
        }
    }

    /// Give every star that is not bright its initial disk.
    ///
    /// Disk radius scales as `100 au (M/M☉)^½` and disk mass is a tenth of
    /// the stellar mass.
    pub fn initialize(mut stars: Vec<Star>, config: &SimulationConfig) -> Result<Self> {
        let params = config.grid_params();
        let mut registry = DiskRegistry::new();

        for star in stars.iter_mut().filter(|s| !s.bright) {
            let m = star.stellar_mass.to_solar_masses();
            let radius = Length::from_au(100.0 * m.sqrt());
            let mass = Mass::from_solar_masses(0.1 * m);
            let disk = DiskGrid::lynden_bell_pringle(&params, star.stellar_mass, radius, mass);

            let initial_radius = disk.radius();
            let initial_mass = disk.disk_mass(initial_radius);
            star.disk_radius = initial_radius;
            star.disk_mass = initial_mass;
            star.initial_disk_radius = initial_radius;
            star.initial_disk_mass = initial_mass;
            star.disk_radius_np = initial_radius;
            star.disk_mass_np = initial_mass;
            star.dispersion_threshold = config.dispersion_density();
            star.refresh_total_mass();

            registry.register(star.key, disk)?;
        }

        info!(
            stars = stars.len(),
            disks = registry.active_count(),
            "initialized disks"
        );
        Ok(Self::new(config.t_ini(), stars, registry))
    }

    pub fn star(&self, key: StarKey) -> Option<&Star> {
        index_of(&self.stars, key).map(|i| &self.stars[i])
    }

    pub fn star_mut(&mut self, key: StarKey) -> Option<&mut Star> {
        index_of(&self.stars, key).map(move |i| &mut self.stars[i])
    }

    pub fn active_disks(&self) -> usize {
        self.registry.active_count()
    }

    /// Remove the disk of `key` from the registry and freeze its star record.
    pub fn retire_disk(&mut self, key: StarKey, cause: RetirementCause) -> Result<()> {
        self.registry.retire(key)?;
        let time = self.time;
        if let Some(star) = self.star_mut(key) {
            star.freeze_disk(time);
        }
        *self.stats.retirements.entry(cause).or_default() += 1;
        info!(
            star = %key,
            %cause,
            time_myr = time.to_myr(),
            active = self.registry.active_count(),
            "disk retired"
        );
        Ok(())
    }
}
