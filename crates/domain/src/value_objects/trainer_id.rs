//! Trainer identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Database identifier of a registered trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainerId(i64);

impl TrainerId {
    /// Wrap a raw row id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying row id
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TrainerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
