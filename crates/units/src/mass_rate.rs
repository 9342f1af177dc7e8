use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

use crate::mass::Mass;
use crate::time::Time;

/// A mass-loss or accretion rate with solar masses per year as the base unit.
///
/// Photoevaporation tables tabulate `log10(Ṁ / M☉ yr⁻¹)`, so the log-space
/// constructor is the common entry point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MassRate(f64); // Base unit: Solar Masses per year

impl MassRate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_solar_masses_per_year(value: f64) -> Self {
        Self(value)
    }

    /// Creates a rate from `log10(Ṁ / M☉ yr⁻¹)`.
    pub fn from_log10_solar_masses_per_year(log_rate: f64) -> Self {
        Self(10f64.powf(log_rate))
    }

    pub fn to_solar_masses_per_year(&self) -> f64 {
        self.0
    }

    /// Mass transferred at this rate over `duration`.
    pub fn integrate(&self, duration: Time) -> Mass {
        Mass::from_solar_masses(self.0 * duration.to_years())
    }
}

impl Add for MassRate {
    type Output = MassRate;

    fn add(self, rhs: MassRate) -> MassRate {
        MassRate(self.0 + rhs.0)
    }
}

impl Mul<f64> for MassRate {
    type Output = MassRate;

    fn mul(self, rhs: f64) -> MassRate {
        MassRate(self.0 * rhs)
    }
}
