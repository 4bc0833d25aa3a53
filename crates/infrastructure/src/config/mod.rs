//! Application configuration
//!
//! Split into focused sub-modules:
//! - `telegram`: Bot API credentials, polling and whitelist
//! - `database`: SQLite database settings
//! - `scheduling`: Timezone, listing sizes and per-trainer limits
//!
//! Logging settings live next to the subscriber in `telemetry`.

mod database;
mod scheduling;
mod telegram;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use database::DatabaseConfig;
pub use scheduling::{LimitsConfig, SchedulingConfig};
pub use telegram::TelegramAppConfig;

use crate::telemetry::LoggingConfig;

/// Environment variable prefix, e.g. `FITCOACH_TELEGRAM__BOT_TOKEN`
pub const ENV_PREFIX: &str = "FITCOACH";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the optional `config` file and the environment
    ///
    /// Environment variables override the file: `FITCOACH_` followed by the
    /// section and key joined with `__`, e.g. `FITCOACH_SCHEDULING__TIMEZONE`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false))
    }

    /// Load with an explicit file source; environment still takes precedence
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("telegram.whitelist")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        info!(
            environment = %config.environment,
            timezone = %config.scheduling.timezone,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.scheduling.tz()?;
        self.telegram.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}
