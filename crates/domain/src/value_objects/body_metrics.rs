//! Body measurement value objects
//!
//! Height in centimetres (100-250) and weight in kilograms (30-300), both
//! inclusive.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a measurement is outside its accepted range
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum InvalidMeasurement {
    #[error("invalid height: {0} cm is out of range (must be 100-250)")]
    Height(f64),
    #[error("invalid weight: {0} kg is out of range (must be 30-300)")]
    Weight(f64),
}

/// Body height in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Height(f64);

impl Height {
    pub const MIN_CM: f64 = 100.0;
    pub const MAX_CM: f64 = 250.0;

    /// Create a validated height
    pub fn new(cm: f64) -> Result<Self, InvalidMeasurement> {
        if cm.is_finite() && (Self::MIN_CM..=Self::MAX_CM).contains(&cm) {
            Ok(Self(cm))
        } else {
            Err(InvalidMeasurement::Height(cm))
        }
    }

    #[must_use]
    pub const fn cm(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} см", self.0)
    }
}

/// Body weight in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const MIN_KG: f64 = 30.0;
    pub const MAX_KG: f64 = 300.0;

    /// Create a validated weight
    pub fn new(kg: f64) -> Result<Self, InvalidMeasurement> {
        if kg.is_finite() && (Self::MIN_KG..=Self::MAX_KG).contains(&kg) {
            Ok(Self(kg))
        } else {
            Err(InvalidMeasurement::Weight(kg))
        }
    }

    #[must_use]
    pub const fn kg(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} кг", self.0)
    }
}
