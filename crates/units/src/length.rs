use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

pub const AU_TO_CM: f64 = 1.496e13;

/// One parsec in AU (648000/π).
pub const PARSEC_TO_AU: f64 = 206_264.806;

/// A length with astronomical units (AU) as the base unit.
///
/// Disk radii are naturally expressed in AU, cluster scales in parsec and
/// grid cells in centimetres; all three convert through this type.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let disk = Length::from_au(100.0);
/// let cluster = Length::from_parsecs(0.25);
///
/// assert!(cluster > disk);
/// assert!((Length::from_cm(disk.to_cm()).to_au() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: AU

impl Length {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_au(value: f64) -> Self {
        Self(value)
    }

    pub fn from_parsecs(value: f64) -> Self {
        Self(value * PARSEC_TO_AU)
    }

    pub fn from_cm(value: f64) -> Self {
        Self(value / AU_TO_CM)
    }

    pub fn to_au(&self) -> f64 {
        self.0
    }

    pub fn to_parsecs(&self) -> f64 {
        self.0 / PARSEC_TO_AU
    }

    pub fn to_cm(&self) -> f64 {
        self.0 * AU_TO_CM
    }

    /// Returns the minimum of two lengths.
    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two lengths.
    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
