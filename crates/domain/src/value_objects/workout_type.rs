//! Kind of training session

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Choice;

/// Type of a scheduled workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Functional,
    Stretching,
    MartialArts,
    Swimming,
    Cycling,
    Mixed,
}

impl WorkoutType {
    /// Storage code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Functional => "functional",
            Self::Stretching => "stretching",
            Self::MartialArts => "martial_arts",
            Self::Swimming => "swimming",
            Self::Cycling => "cycling",
            Self::Mixed => "mixed",
        }
    }
}

impl Choice for WorkoutType {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("workout_type_strength", Self::Strength),
        ("workout_type_cardio", Self::Cardio),
        ("workout_type_functional", Self::Functional),
        ("workout_type_stretching", Self::Stretching),
        ("workout_type_martial_arts", Self::MartialArts),
        ("workout_type_swimming", Self::Swimming),
        ("workout_type_cycling", Self::Cycling),
        ("workout_type_mixed", Self::Mixed),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Strength => "Силовая",
            Self::Cardio => "Кардио",
            Self::Functional => "Функциональная",
            Self::Stretching => "Растяжка",
            Self::MartialArts => "Единоборства",
            Self::Swimming => "Плавание",
            Self::Cycling => "Велосипед",
            Self::Mixed => "Смешанная",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Invalid workout type: {s}"))
    }
}
