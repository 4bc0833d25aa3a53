//! Application layer - Use cases and orchestration
//!
//! Contains the date/time resolver, the dialogue sequencer, port definitions
//! and the services that turn chat updates into replies.

pub mod date_parser;
pub mod dialogue;
pub mod error;
pub mod ports;
pub mod services;

pub use date_parser::{DateResolveError, resolve};
pub use dialogue::{DialogueRegistry, FlowId};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
