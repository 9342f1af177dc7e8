//! Periodic dumps of the star population and the energy log.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiskClusterError, Result};
use crate::star::Star;

const ENERGY_LOG: &str = "energy.jsonl";

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub time_myr: f64,
    pub active_disks: usize,
    pub stars: &'a [Star],
}

/// Energy diagnostics taken before each gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub time_myr: f64,
    /// `E / E_ini - 1`
    pub energy_error: f64,
    /// `-E_kin / E_pot`
    pub virial_ratio: f64,
}

pub trait SnapshotSink {
    fn write_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;

    fn record_energy(&mut self, record: &EnergyRecord) -> Result<()>;
}

/// Writes `N{n}_t{Myr}.json` files and appends to `energy.jsonl` in one directory.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    directory: PathBuf,
    n_stars: usize,
}

impl JsonDirectorySink {
    pub fn create(directory: impl Into<PathBuf>, n_stars: usize) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| DiskClusterError::File {
            path: directory.clone(),
            source,
        })?;
        Ok(Self { directory, n_stars })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn snapshot_path(&self, time_myr: f64) -> PathBuf {
        self.directory
            .join(format!("N{}_t{:.3}.json", self.n_stars, time_myr))
    }

    pub fn energy_path(&self) -> PathBuf {
        self.directory.join(ENERGY_LOG)
    }
}

impl SnapshotSink for JsonDirectorySink {
    fn write_snapshot(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let path = self.snapshot_path(snapshot.time_myr);
        let file = File::create(&path).map_err(|source| DiskClusterError::File {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }

    fn record_energy(&mut self, record: &EnergyRecord) -> Result<()> {
        let path = self.energy_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| DiskClusterError::File { path, source })?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn write_snapshot(&mut self, _snapshot: &Snapshot<'_>) -> Result<()> {
        Ok(())
    }

    fn record_energy(&mut self, _record: &EnergyRecord) -> Result<()> {
        Ok(())
    }
}
