//! Persistence module
//!
//! SQLite storage for trainers, clients and workouts via sqlx.

pub mod async_connection;
pub mod client_store;
pub mod error;
pub mod trainer_store;
pub mod workout_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use client_store::SqliteClientStore;
pub use error::map_sqlx_error;
pub use trainer_store::SqliteTrainerStore;
pub use workout_store::SqliteWorkoutStore;
