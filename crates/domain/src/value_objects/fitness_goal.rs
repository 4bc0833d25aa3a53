//! Primary training goal of a client

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Choice;

/// What the client primarily wants to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Strength,
    Endurance,
    Health,
    SportSpecific,
}

impl FitnessGoal {
    /// Storage code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Health => "health",
            Self::SportSpecific => "sport_specific",
        }
    }

    /// Emoji used in roster listings
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::WeightLoss => "🔥",
            Self::MuscleGain => "💪",
            Self::Strength => "⚡",
            Self::Endurance => "🏃‍♂️",
            Self::Health => "🏥",
            Self::SportSpecific => "🏆",
        }
    }
}

impl Choice for FitnessGoal {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("goal_weight_loss", Self::WeightLoss),
        ("goal_muscle_gain", Self::MuscleGain),
        ("goal_strength", Self::Strength),
        ("goal_endurance", Self::Endurance),
        ("goal_health", Self::Health),
        ("goal_sport_specific", Self::SportSpecific),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Похудение",
            Self::MuscleGain => "Набор мышечной массы",
            Self::Strength => "Развитие силы",
            Self::Endurance => "Выносливость",
            Self::Health => "Здоровье",
            Self::SportSpecific => "Спортивная подготовка",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight_loss" => Ok(Self::WeightLoss),
            "muscle_gain" => Ok(Self::MuscleGain),
            "strength" => Ok(Self::Strength),
            "endurance" => Ok(Self::Endurance),
            "health" => Ok(Self::Health),
            "sport_specific" => Ok(Self::SportSpecific),
            other => Err(format!("Invalid fitness goal: {other}")),
        }
    }
}
