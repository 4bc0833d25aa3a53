//! Presentation layer for the Telegram bot
//!
//! Wires the stores and services together and drives them from a
//! long-polling loop.

pub mod polling;
pub mod wiring;

pub use polling::{DEFAULT_ERROR_BACKOFF, Poller};
pub use wiring::build_bot_service;
