use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use units::{Length, Mass, SurfaceDensity, Time};

pub use nbody::ParticleKey as StarKey;

/// One star of the cluster together with the bookkeeping of its disk.
///
/// Disk fields are mirrors of the star's [`DiskGrid`](crate::disk::DiskGrid)
/// refreshed by the orchestrator; once the disk is retired they are zeroed and
/// the record is frozen with `dispersed = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub key: StarKey,
    /// Massive star without a disk that irradiates the others
    pub bright: bool,
    pub stellar_mass: Mass,
    /// Stellar plus disk mass
    pub mass: Mass,
    /// AU
    pub position: Point3<f64>,
    /// AU/yr
    pub velocity: Vector3<f64>,
    pub collision_radius: Length,

    pub disk_radius: Length,
    pub disk_mass: Mass,
    pub initial_disk_radius: Length,
    pub initial_disk_mass: Mass,
    /// Disk size and mass as shaped by dynamics alone
    pub disk_radius_np: Length,
    pub disk_mass_np: Mass,
    pub dispersion_threshold: SurfaceDensity,

    pub dispersed: bool,
    /// Set once the retirement of a dispersed disk has been processed
    pub checked: bool,
    pub dispersal_time: Option<Time>,

    pub photoevap_mass_loss: Mass,
    pub cumulative_photoevap_mass_loss: Mass,
    pub truncation_mass_loss: Mass,
    pub cumulative_truncation_mass_loss: Mass,

    /// Incident FUV flux in units of G0
    pub g0: f64,
    pub euv: bool,
    pub nearby_supernova: bool,
    pub encounters: u32,
}

impl Star {
    pub fn new(
        key: StarKey,
        stellar_mass: Mass,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        collision_radius: Length,
        bright: bool,
    ) -> Self {
        Self {
            key,
            bright,
            stellar_mass,
            mass: stellar_mass,
            position,
            velocity,
            collision_radius,
            disk_radius: Length::zero(),
            disk_mass: Mass::zero(),
            initial_disk_radius: Length::zero(),
            initial_disk_mass: Mass::zero(),
            disk_radius_np: Length::zero(),
            disk_mass_np: Mass::zero(),
            dispersion_threshold: SurfaceDensity::zero(),
            dispersed: false,
            checked: false,
            dispersal_time: None,
            photoevap_mass_loss: Mass::zero(),
            cumulative_photoevap_mass_loss: Mass::zero(),
            truncation_mass_loss: Mass::zero(),
            cumulative_truncation_mass_loss: Mass::zero(),
            g0: 0.0,
            euv: false,
            nearby_supernova: false,
            encounters: 0,
        }
    }

    /// Whether the star still owns a live disk.
    pub fn has_disk(&self) -> bool {
        !self.bright && !self.dispersed
    }

    pub fn refresh_total_mass(&mut self) {
        self.mass = self.stellar_mass + self.disk_mass;
    }

    /// Zero the disk fields and latch the star as dispersed at `time`.
    ///
    /// A dispersal time already recorded (a disk destroyed in an encounter)
    /// is kept.
    pub fn freeze_disk(&mut self, time: Time) {
        self.disk_radius = Length::zero();
        self.disk_mass = Mass::zero();
        self.dispersed = true;
        self.checked = true;
        self.dispersal_time.get_or_insert(time);
        self.refresh_total_mass();
    }

    pub fn distance_to(&self, other: &Star) -> Length {
        Length::from_au((self.position - other.position).magnitude())
    }
}

/// Position of `key` in `stars`.
pub fn index_of(stars: &[Star], key: StarKey) -> Option<usize> {
    stars.iter().position(|s| s.key == key)
}

/// Two distinct stars borrowed mutably at once.
pub fn pair_mut(stars: &mut [Star], i: usize, j: usize) -> Option<(&mut Star, &mut Star)> {
    if i == j || i >= stars.len() || j >= stars.len() {
        return None;
    }
    if i < j {
        let (head, tail) = stars.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = stars.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
