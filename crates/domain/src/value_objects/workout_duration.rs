//! Workout duration in minutes

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a duration is outside 15-300 minutes
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid duration: {0} minutes is out of range (must be 15-300)")]
pub struct InvalidDuration(u32);

/// Length of a workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutDuration(u32);

impl WorkoutDuration {
    pub const MIN_MINUTES: u32 = 15;
    pub const MAX_MINUTES: u32 = 300;
    /// Used when the trainer skips the duration step
    pub const DEFAULT: Self = Self(60);

    pub const fn new(minutes: u32) -> Result<Self, InvalidDuration> {
        if minutes < Self::MIN_MINUTES || minutes > Self::MAX_MINUTES {
            Err(InvalidDuration(minutes))
        } else {
            Ok(Self(minutes))
        }
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl Default for WorkoutDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WorkoutDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} мин", self.0)
    }
}
