use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

pub const SECONDS_PER_YEAR: f64 = 31_557_600.0; // 365.25 days per year

const MYR_TO_YEARS: f64 = 1_000_000.0;

/// A time or duration with years as the base unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Years

impl Time {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_years(value: f64) -> Self {
        Self(value)
    }

    pub fn from_myr(value: f64) -> Self {
        Self(value * MYR_TO_YEARS)
    }

    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_YEAR)
    }

    pub fn to_years(&self) -> f64 {
        self.0
    }

    pub fn to_myr(&self) -> f64 {
        self.0 / MYR_TO_YEARS
    }

    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_YEAR
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.0 += rhs.0;
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}
