//! Registry of the disks that are still being evolved.
//!
//! Disks are kept in registration order. Retiring a disk shifts every later
//! disk down one position, so positions always form the dense range
//! `0..active_count()`. The registry also owns the set of disks whose last
//! viscous step diverged; those are retired at the next consistency check.

use std::collections::HashSet;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use units::Time;

use crate::disk::{DiskGrid, EvolveOutcome};
use crate::error::{DiskClusterError, Result};
use crate::star::StarKey;

/// Why a disk left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementCause {
    /// Truncated below the minimum radius in an encounter
    Truncation,
    /// Viscous solver failed
    Diverged,
    /// Too small or too tenuous after viscous evolution
    DensityThreshold,
    Photoevaporation,
    Supernova,
}

impl std::fmt::Display for RetirementCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RetirementCause::Truncation => "truncation",
            RetirementCause::Diverged => "diverged",
            RetirementCause::DensityThreshold => "density threshold",
            RetirementCause::Photoevaporation => "photoevaporation",
            RetirementCause::Supernova => "supernova",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiskRegistry {
    disks: IndexMap<StarKey, DiskGrid>,
    diverged: HashSet<StarKey>,
}

impl DiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a disk for `key`, returning its position.
    pub fn register(&mut self, key: StarKey, disk: DiskGrid) -> Result<usize> {
        if self.disks.contains_key(&key) {
            return Err(DiskClusterError::DuplicateRegistration { key });
        }
        let (index, _) = self.disks.insert_full(key, disk);
        Ok(index)
    }

    pub fn lookup(&self, key: StarKey) -> Result<&DiskGrid> {
        self.disks
            .get(&key)
            .ok_or(DiskClusterError::RegistryNotFound { key })
    }

    pub fn lookup_mut(&mut self, key: StarKey) -> Result<&mut DiskGrid> {
        self.disks
            .get_mut(&key)
            .ok_or(DiskClusterError::RegistryNotFound { key })
    }

    pub fn get_mut(&mut self, key: StarKey) -> Option<&mut DiskGrid> {
        self.disks.get_mut(&key)
    }

    /// Position of `key` among the active disks.
    pub fn index_of(&self, key: StarKey) -> Option<usize> {
        self.disks.get_index_of(&key)
    }

    /// Remove the disk of `key`, shifting every later disk down one position.
    pub fn retire(&mut self, key: StarKey) -> Result<DiskGrid> {
        let disk = self
            .disks
            .shift_remove(&key)
            .ok_or(DiskClusterError::RegistryNotFound { key })?;
        self.diverged.remove(&key);
        Ok(disk)
    }

    pub fn active_count(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Keys of the active disks, in position order.
    pub fn keys(&self) -> impl Iterator<Item = StarKey> + '_ {
        self.disks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StarKey, &DiskGrid)> + '_ {
        self.disks.iter().map(|(k, d)| (*k, d))
    }

    pub fn mark_diverged(&mut self, key: StarKey) {
        if self.disks.contains_key(&key) {
            self.diverged.insert(key);
        }
    }

    pub fn is_diverged(&self, key: StarKey) -> bool {
        self.diverged.contains(&key)
    }

    pub fn clear_diverged(&mut self) {
        self.diverged.clear();
    }

    /// Advance every active disk by `dt` in parallel.
    ///
    /// All disks finish before this returns. Disks that failed are added to
    /// the diverged set and their keys returned in position order.
    pub fn evolve_all(&mut self, dt: Time) -> Vec<StarKey> {
        let outcomes: Vec<(StarKey, EvolveOutcome)> = self
            .disks
            .par_iter_mut()
            .map(|(key, disk)| (*key, disk.evolve(dt)))
            .collect();

        let failed: Vec<StarKey> = outcomes
            .into_iter()
            .filter(|(_, outcome)| *outcome == EvolveOutcome::Diverged)
            .map(|(key, _)| key)
            .collect();
        self.diverged.extend(failed.iter().copied());
        failed
    }
}
