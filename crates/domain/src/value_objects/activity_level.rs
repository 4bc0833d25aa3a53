//! Client everyday activity level

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Choice;

/// Everyday activity level of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Storage code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl Choice for ActivityLevel {
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("activity_sedentary", Self::Sedentary),
        ("activity_light", Self::Light),
        ("activity_moderate", Self::Moderate),
        ("activity_active", Self::Active),
        ("activity_very_active", Self::VeryActive),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Сидячий образ жизни",
            Self::Light => "Низкая активность",
            Self::Moderate => "Умеренная активность",
            Self::Active => "Высокая активность",
            Self::VeryActive => "Очень высокая активность",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            other => Err(format!("Invalid activity level: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn very_active_token_is_not_confused_with_active() {
        assert_eq!(
            ActivityLevel::from_token("activity_very_active"),
            Some(ActivityLevel::VeryActive)
        );
        assert_eq!(
            ActivityLevel::from_token("activity_active"),
            Some(ActivityLevel::Active)
        );
    }
}
