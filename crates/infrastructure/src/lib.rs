//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite stores via
//! sqlx, the Telegram messenger adapter, configuration loading and logging.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, LimitsConfig, SchedulingConfig, TelegramAppConfig,
};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteClientStore, SqliteTrainerStore,
    SqliteWorkoutStore,
};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
