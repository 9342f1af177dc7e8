use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Mass of the Sun in grams (1.98847 × 10³³ g)
pub const SOLAR_MASS_G: f64 = 1.98847e33;

/// Mass of the Earth in grams (5.972 × 10²⁷ g)
pub const EARTH_MASS_G: f64 = 5.972e27;

/// Mass of Jupiter in grams (1.898 × 10³⁰ g)
pub const JUPITER_MASS_G: f64 = 1.898e30;

/// A mass with solar masses as the base unit.
///
/// Stellar masses are carried in solar masses, disk masses are usually
/// quoted in Jupiter masses and the photoevaporation floor in Earth masses,
/// so all three conversions are first-class.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let star = Mass::from_solar_masses(0.5);
/// let disk = star * 0.1;
///
/// assert!((disk.to_jupiter_masses() - 52.38).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Solar Masses

impl Mass {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_solar_masses(value: f64) -> Self {
        Self(value)
    }

    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_G / SOLAR_MASS_G)
    }

    pub fn from_jupiter_masses(value: f64) -> Self {
        Self(value * JUPITER_MASS_G / SOLAR_MASS_G)
    }

    pub fn from_grams(value: f64) -> Self {
        Self(value / SOLAR_MASS_G)
    }

    pub fn to_solar_masses(&self) -> f64 {
        self.0
    }

    pub fn to_earth_masses(&self) -> f64 {
        self.0 * SOLAR_MASS_G / EARTH_MASS_G
    }

    pub fn to_jupiter_masses(&self) -> f64 {
        self.0 * SOLAR_MASS_G / JUPITER_MASS_G
    }

    pub fn to_grams(&self) -> f64 {
        self.0 * SOLAR_MASS_G
    }

    /// Clamps negative values (from floating-point cancellation) to zero.
    pub fn non_negative(self) -> Self {
        Self(self.0.max(0.0))
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl AddAssign for Mass {
    fn add_assign(&mut self, rhs: Mass) {
        self.0 += rhs.0;
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl SubAssign for Mass {
    fn sub_assign(&mut self, rhs: Mass) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}

impl Sum for Mass {
    fn sum<I: Iterator<Item = Mass>>(iter: I) -> Mass {
        iter.fold(Mass::zero(), |acc, m| acc + m)
    }
}
