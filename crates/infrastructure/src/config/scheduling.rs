//! Scheduling and per-trainer limits.

use application::{DEFAULT_MAX_CLIENTS_PER_TRAINER, DEFAULT_ROSTER_SIZE, DEFAULT_UPCOMING_LIMIT};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How dates are interpreted and how much is listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// IANA timezone for "today" and typed dates
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Upcoming workouts listed at once
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: u32,

    /// Clients rendered in the roster
    #[serde(default = "default_roster_size")]
    pub roster_size: usize,

    /// Workouts listed in a client's history
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

fn default_timezone() -> String {
    "Europe/Moscow".to_string()
}

const fn default_upcoming_limit() -> u32 {
    DEFAULT_UPCOMING_LIMIT
}

const fn default_roster_size() -> usize {
    DEFAULT_ROSTER_SIZE
}

const fn default_history_limit() -> u32 {
    10
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            upcoming_limit: default_upcoming_limit(),
            roster_size: default_roster_size(),
            history_limit: default_history_limit(),
        }
    }
}

impl SchedulingConfig {
    /// The configured timezone, validated against the IANA database
    pub fn tz(&self) -> Result<Tz, config::ConfigError> {
        self.timezone.parse::<Tz>().map_err(|e| {
            config::ConfigError::Message(format!(
                "scheduling.timezone '{}' is not a valid IANA timezone: {e}",
                self.timezone
            ))
        })
    }
}

/// Resource limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_clients")]
    pub max_clients_per_trainer: u32,
}

const fn default_max_clients() -> u32 {
    DEFAULT_MAX_CLIENTS_PER_TRAINER
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clients_per_trainer: default_max_clients(),
        }
    }
}

impl LimitsConfig {
    pub(super) fn validate(&self) -> Result<(), config::ConfigError> {
        if self.max_clients_per_trainer == 0 {
            return Err(config::ConfigError::Message(
                "limits.max_clients_per_trainer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
