//! Adapters implementing application ports
//!
//! These adapters bridge the application layer's port interfaces
//! to concrete infrastructure implementations.

mod telegram_adapter;

pub use telegram_adapter::TelegramMessengerAdapter;
