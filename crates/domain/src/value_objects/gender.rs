//! Client gender

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Choice;

/// Gender selected during client intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Storage code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl Choice for Gender {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("gender_male", Self::Male),
        ("gender_female", Self::Female),
        ("gender_other", Self::Other),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Мужской",
            Self::Female => "Женский",
            Self::Other => "Другой",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(format!("Invalid gender: {other}")),
        }
    }
}
