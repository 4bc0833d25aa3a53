//! Workout lifecycle status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle state of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    /// Scheduled and not yet held
    #[default]
    Planned,
    /// Held
    Completed,
    /// Client did not show up
    Missed,
    /// Called off
    Cancelled,
}

impl WorkoutStatus {
    /// Storage code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Short status marker for lists
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Planned => "⏳",
            Self::Completed => "✅",
            Self::Missed => "❌",
            Self::Cancelled => "🚫",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Planned => "Запланирована",
            Self::Completed => "Завершена",
            Self::Missed => "Пропущена",
            Self::Cancelled => "Отменена",
        }
    }

    /// Whether the workout can still be completed or cancelled
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

impl FromStr for WorkoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "completed" => Ok(Self::Completed),
            "missed" => Ok(Self::Missed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Invalid workout status: {other}")),
        }
    }
}
