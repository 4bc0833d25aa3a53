//! Person name value object
//!
//! A trimmed name of at least two characters, used for client first and last
//! names.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::PersonName;
//!
//! let name = PersonName::new("  Анна ").expect("valid name");
//! assert_eq!(name.as_str(), "Анна");
//! assert!(PersonName::new("A").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a name is too short after trimming
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid name '{0}': must contain at least {min} characters", min = PersonName::MIN_CHARS)]
pub struct InvalidPersonName(String);

/// A validated person name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Minimum number of characters after trimming
    pub const MIN_CHARS: usize = 2;

    /// Create a validated name; surrounding whitespace is removed
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidPersonName> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() < Self::MIN_CHARS {
            return Err(InvalidPersonName(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = InvalidPersonName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}
