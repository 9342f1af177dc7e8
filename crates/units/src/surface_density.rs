use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// A column (surface) density with g/cm² as the base unit.
///
/// Disk grids store column density per cell; the dispersal and edge
/// thresholds used throughout the disk lifecycle are expressed in the same
/// unit.
///
/// # Examples
///
/// ```rust
/// use units::SurfaceDensity;
///
/// let edge = SurfaceDensity::from_grams_per_cm2(1e-10);
/// let dispersal = SurfaceDensity::from_grams_per_cm2(1e-5);
/// assert!(edge < dispersal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SurfaceDensity(f64); // Base unit: g/cm²

impl SurfaceDensity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_grams_per_cm2(value: f64) -> Self {
        Self(value)
    }

    pub fn to_grams_per_cm2(&self) -> f64 {
        self.0
    }
}

impl Mul<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn mul(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 * rhs)
    }
}

impl Div<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn div(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 / rhs)
    }
}
