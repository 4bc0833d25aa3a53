//! Domain layer for FitCoach
//!
//! Contains the trainer, client and workout entities, the value objects that
//! validate what trainers type, bot commands and domain errors.
//! This layer performs no I/O.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use commands::{BotCommand, CallbackAction, SKIP_TOKEN};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
