//! Client entity - a person trained by a trainer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{
    ActivityLevel, ClientId, FitnessGoal, Gender, Height, PersonName, Weight,
};

/// A trainer's client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub height: Option<Height>,
    pub weight: Option<Weight>,
    pub primary_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
    pub medical_conditions: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// First name followed by the last name when present
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

/// Client record produced by the intake dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub first_name: PersonName,
    pub last_name: Option<PersonName>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub height: Option<Height>,
    pub weight: Option<Weight>,
    pub primary_goal: Option<FitnessGoal>,
    pub activity_level: Option<ActivityLevel>,
    pub medical_conditions: Option<String>,
}

impl NewClient {
    /// Minimal client with only a first name
    #[must_use]
    pub const fn new(first_name: PersonName) -> Self {
        Self {
            first_name,
            last_name: None,
            phone: None,
            email: None,
            gender: None,
            height: None,
            weight: None,
            primary_goal: None,
            activity_level: None,
            medical_conditions: None,
        }
    }

    #[must_use]
    pub fn with_last_name(mut self, last_name: PersonName) -> Self {
        self.last_name = Some(last_name);
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    #[must_use]
    pub const fn with_goal(mut self, goal: FitnessGoal) -> Self {
        self.primary_goal = Some(goal);
        self
    }

    #[must_use]
    pub const fn with_activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }
}
