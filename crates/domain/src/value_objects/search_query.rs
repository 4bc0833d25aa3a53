//! Client search query

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("search query too short: '{0}'")]
pub struct InvalidSearchQuery(String);

/// A trimmed search string of at least two characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub const MIN_CHARS: usize = 2;

    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidSearchQuery> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() < Self::MIN_CHARS {
            return Err(InvalidSearchQuery(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match, Unicode aware
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
