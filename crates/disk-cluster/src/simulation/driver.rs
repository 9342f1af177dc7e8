//! Main simulation driver.
//!
//! Steps the cluster and its disks through one time step at a time in a fixed
//! order: half-step stellar evolution, gravity, encounters, the second stellar
//! half step, supernovae, viscous evolution, disk checks, photoevaporation and
//! bookkeeping. Disk retirements within a phase are collected before they are
//! applied so registry indices never shift under an iteration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use units::Time;

use super::collaborators::{GravityCode, StellarCode};
use super::snapshot::{EnergyRecord, Snapshot, SnapshotSink};
use super::state::{RunStats, SimulationState};
use crate::config::SimulationConfig;
use crate::encounter::{resolve_encounter, EncounterParams};
use crate::error::{DiskClusterError, Result};
use crate::photoevaporation::{PhotoevaporationEngine, PhotoevaporationOutcome};
use crate::registry::RetirementCause;
use crate::star::{index_of, StarKey};
use crate::supernova::{respond_to_supernova, SupernovaEffect};

/// Snapshot times closer than this to a multiple of the save interval count as on it.
const SNAPSHOT_TOLERANCE_YR: f64 = 0.5;

/// Remaining time below which the run counts as finished.
const END_TOLERANCE_YR: f64 = 1e-6;

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Time at the end of the step
    pub time: Time,
    pub dt: Time,
    pub encounters: usize,
    pub supernovae: usize,
    pub diverged: usize,
    pub retired: usize,
    pub active_disks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_time_myr: f64,
    pub active_disks: usize,
    pub remaining_stars: usize,
    /// Every disk was retired before the end time
    pub terminated_early: bool,
    pub stats: RunStats,
}

/// Drives the coupled evolution of stars, disks and the cluster potential.
///
/// Each step runs, in order: half a step of stellar evolution, the gravity
/// step, encounter resolution, the second half of stellar evolution,
/// supernova response, viscous evolution of every disk, the consistency
/// check, photoevaporation and bookkeeping. Gravity and stellar codes run on
/// their own clock, which is zero at `t_ini`.
pub struct Simulation<G, S, K> {
    config: SimulationConfig,
    state: SimulationState,
    engine: PhotoevaporationEngine,
    gravity: G,
    stellar: S,
    sink: K,
    encounter_params: EncounterParams,
    initial_energy: f64,
}

impl<G, S, K> Simulation<G, S, K>
where
    G: GravityCode,
    S: StellarCode,
    K: SnapshotSink,
{
    pub fn new(
        config: SimulationConfig,
        state: SimulationState,
        engine: PhotoevaporationEngine,
        gravity: G,
        stellar: S,
        sink: K,
    ) -> Result<Self> {
        config.validate()?;
        let encounter_params = EncounterParams {
            min_disk_radius: config.min_disk_radius(),
            truncation_density: config.grid_params().truncation_density,
        };
        let initial_energy = gravity.kinetic_energy() + gravity.potential_energy();

        Ok(Self {
            config,
            state,
            engine,
            gravity,
            stellar,
            sink,
            encounter_params,
            initial_energy,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn gravity(&self) -> &G {
        &self.gravity
    }

    pub fn gravity_mut(&mut self) -> &mut G {
        &mut self.gravity
    }

    pub fn stellar(&self) -> &S {
        &self.stellar
    }

    pub fn stellar_mut(&mut self) -> &mut S {
        &mut self.stellar
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn time(&self) -> Time {
        self.state.time
    }

    pub fn is_time_up(&self) -> bool {
        (self.config.t_end() - self.state.time).to_years() <= END_TOLERANCE_YR
    }

    pub fn is_finished(&self) -> bool {
        self.is_time_up() || self.state.registry.is_empty()
    }

    /// Step until the end time or until no disk is left.
    ///
    /// On failure the current state is written to the sink before the error
    /// is returned.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(
            stars = self.state.stars.len(),
            disks = self.state.active_disks(),
            t_end_myr = self.config.t_end().to_myr(),
            "starting run"
        );
        self.write_snapshot()?;

        while !self.is_finished() {
            if let Err(err) = self.step() {
                if let Err(flush_err) = self.write_snapshot() {
                    warn!(error = %flush_err, "could not flush snapshot after failure");
                }
                return Err(err);
            }
        }

        let terminated_early = !self.is_time_up();
        if terminated_early {
            info!(
                time_myr = self.state.time.to_myr(),
                "all disks retired, stopping early"
            );
        } else {
            self.write_snapshot()?;
        }

        let summary = self.summary(terminated_early);
        info!(
            time_myr = summary.final_time_myr,
            active = summary.active_disks,
            encounters = summary.stats.encounters,
            supernovae = summary.stats.supernovae,
            "run finished"
        );
        Ok(summary)
    }

    pub fn summary(&self, terminated_early: bool) -> RunSummary {
        RunSummary {
            final_time_myr: self.state.time.to_myr(),
            active_disks: self.state.active_disks(),
            remaining_stars: self.state.stars.len(),
            terminated_early,
            stats: self.state.stats.clone(),
        }
    }

    /// Advance the whole system by one time step.
    pub fn step(&mut self) -> Result<StepReport> {
        let t = self.state.time;
        let dt = self.config.dt().min(self.config.t_end() - t);
        if dt.to_years() <= 0.0 {
            return Err(DiskClusterError::Config(format!(
                "no time left to step at {} Myr",
                t.to_myr()
            )));
        }
        let t_next = t + dt;
        let clock_mid = self.clock(t + dt * 0.5);
        let clock_next = self.clock(t_next);
        let active_before = self.state.active_disks();

        self.stellar.evolve_model(clock_mid);
        self.sync_stellar_masses();

        self.record_energy()?;
        self.gravity.evolve_model(clock_next);
        self.sync_phase_space();

        let encounters = self.resolve_encounters(t_next);

        self.stellar.evolve_model(clock_next);
        self.sync_stellar_masses();
        let supernovae = self.handle_supernovae()?;

        self.state.registry.clear_diverged();
        let diverged = self.state.registry.evolve_all(dt);
        for key in &diverged {
            warn!(star = %key, "viscous step diverged");
        }

        self.check_disks()?;
        self.photoevaporate(dt)?;

        self.state.time = t_next;
        self.state.stats.steps += 1;
        if self.snapshot_due() || self.state.registry.is_empty() {
            self.write_snapshot()?;
        }

        let report = StepReport {
            time: t_next,
            dt,
            encounters,
            supernovae,
            diverged: diverged.len(),
            retired: active_before.saturating_sub(self.state.active_disks()),
            active_disks: self.state.active_disks(),
        };
        debug!(
            time_myr = t_next.to_myr(),
            active = report.active_disks,
            encounters,
            retired = report.retired,
            "step done"
        );
        Ok(report)
    }

    /// Collaborator clock for a simulation time.
    fn clock(&self, time: Time) -> Time {
        time - self.config.t_ini()
    }

    fn sync_stellar_masses(&mut self) {
        for star in self.state.stars.iter_mut().filter(|s| s.bright) {
            if let Some(mass) = self.stellar.stellar_mass(star.key) {
                star.stellar_mass = mass;
                star.refresh_total_mass();
                self.gravity.set_mass(star.key, star.mass);
            }
        }
    }

    fn sync_phase_space(&mut self) {
        for star in &mut self.state.stars {
            if let Some((position, velocity)) = self.gravity.phase_space(star.key) {
                star.position = position;
                star.velocity = velocity;
            }
        }
    }

    fn record_energy(&mut self) -> Result<()> {
        let kinetic = self.gravity.kinetic_energy();
        let potential = self.gravity.potential_energy();
        let energy_error = if self.initial_energy != 0.0 {
            (kinetic + potential) / self.initial_energy - 1.0
        } else {
            0.0
        };
        let virial_ratio = if potential != 0.0 {
            -kinetic / potential
        } else {
            0.0
        };
        self.sink.record_energy(&EnergyRecord {
            time_myr: self.state.time.to_myr(),
            energy_error,
            virial_ratio,
        })
    }

    fn resolve_encounters(&mut self, time: Time) -> usize {
        let mut resolved = 0;
        for (key_a, key_b) in self.gravity.take_encounters() {
            let stars = &mut self.state.stars;
            let (Some(i), Some(j)) = (index_of(stars, key_a), index_of(stars, key_b)) else {
                warn!(a = %key_a, b = %key_b, "encounter between unknown stars");
                continue;
            };

            let Some(outcome) = resolve_encounter(
                stars,
                i,
                j,
                &mut self.state.registry,
                &self.encounter_params,
                time,
            ) else {
                continue;
            };

            resolved += 1;
            self.state.stats.encounters += 1;
            if outcome.truncated {
                self.state.stats.truncating_encounters += 1;
            }
            for idx in [i, j] {
                let star = &self.state.stars[idx];
                self.gravity
                    .set_collision_radius(star.key, star.collision_radius);
            }
        }
        resolved
    }

    fn handle_supernovae(&mut self) -> Result<usize> {
        let exploded = self.stellar.take_supernovae();
        let floor = self.encounter_params.truncation_density;
        let mut handled = 0;

        for key in exploded {
            let Some(idx) = index_of(&self.state.stars, key) else {
                warn!(star = %key, "supernova of unknown star");
                continue;
            };
            let exploding = self.state.stars[idx].clone();

            let mut destroyed = Vec::new();
            let disk_keys: Vec<StarKey> = self.state.registry.keys().collect();
            for disk_key in disk_keys {
                let Some(si) = index_of(&self.state.stars, disk_key) else {
                    continue;
                };
                let star = &mut self.state.stars[si];
                if !star.has_disk() {
                    continue;
                }
                let Some(disk) = self.state.registry.get_mut(disk_key) else {
                    continue;
                };
                if respond_to_supernova(&exploding, star, disk, floor) == SupernovaEffect::Destroyed
                {
                    destroyed.push(disk_key);
                }
            }
            for disk_key in destroyed {
                self.state.retire_disk(disk_key, RetirementCause::Supernova)?;
            }

            if let Some(idx) = index_of(&self.state.stars, key) {
                self.state.stars.remove(idx);
            }
            self.gravity.remove(key);
            self.stellar.remove(key);
            self.state.stats.supernovae += 1;
            handled += 1;
            info!(
                star = %key,
                time_myr = self.state.time.to_myr(),
                active = self.state.active_disks(),
                "supernova"
            );
        }
        Ok(handled)
    }

    /// Retire disks that were destroyed, diverged or fell below the
    /// dispersion thresholds; refresh the survivors and feed accreted mass
    /// onto their stars.
    fn check_disks(&mut self) -> Result<()> {
        let min_radius = self.config.min_disk_radius();
        let mut retirements = Vec::new();
        let keys: Vec<StarKey> = self.state.registry.keys().collect();

        for key in keys {
            let idx = index_of(&self.state.stars, key).ok_or(DiskClusterError::UnknownStar { key })?;
            let star = &mut self.state.stars[idx];

            if star.dispersed && !star.checked {
                retirements.push((key, RetirementCause::Truncation));
                continue;
            }
            if self.state.registry.is_diverged(key) {
                retirements.push((key, RetirementCause::Diverged));
                continue;
            }

            let disk = self.state.registry.lookup_mut(key)?;
            let radius = disk.radius();
            let density = disk.mean_density(disk.edge_density());
            if radius < min_radius || density <= star.dispersion_threshold {
                retirements.push((key, RetirementCause::DensityThreshold));
                continue;
            }

            star.stellar_mass += disk.inner_mass_out();
            disk.set_stellar_mass(star.stellar_mass);
            star.disk_radius = radius;
            star.disk_mass = disk.disk_mass(radius);
            star.refresh_total_mass();
        }

        for (key, cause) in retirements {
            self.state.retire_disk(key, cause)?;
        }
        Ok(())
    }

    fn photoevaporate(&mut self, dt: Time) -> Result<()> {
        self.engine.irradiate(&mut self.state.stars);

        let mut dispersed = Vec::new();
        let keys: Vec<StarKey> = self.state.registry.keys().collect();
        for key in keys {
            let Some(idx) = index_of(&self.state.stars, key) else {
                continue;
            };
            let star = &mut self.state.stars[idx];
            if !star.has_disk() {
                continue;
            }
            let disk = self.state.registry.lookup_mut(key)?;
            if let PhotoevaporationOutcome::Dispersed { .. } =
                self.engine.evaporate_star(star, disk, dt)
            {
                dispersed.push(key);
            }
        }

        for key in dispersed {
            self.state
                .retire_disk(key, RetirementCause::Photoevaporation)?;
        }
        Ok(())
    }

    fn snapshot_due(&self) -> bool {
        let interval = self.config.save_interval().to_years();
        let elapsed = self.clock(self.state.time).to_years();
        let multiple = (elapsed / interval).round();
        multiple >= 1.0 && (elapsed - multiple * interval).abs() < SNAPSHOT_TOLERANCE_YR
    }

    fn write_snapshot(&mut self) -> Result<()> {
        let snapshot = Snapshot {
            time_myr: self.state.time.to_myr(),
            active_disks: self.state.active_disks(),
            stars: &self.state.stars,
        };
        self.sink.write_snapshot(&snapshot)
    }
}
