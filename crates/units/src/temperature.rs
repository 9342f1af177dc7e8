use serde::{Deserialize, Serialize};

/// A temperature in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    pub fn to_kelvin(&self) -> f64 {
        self.0
    }
}
