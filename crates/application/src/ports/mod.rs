//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod client_store;
mod messenger_port;
mod trainer_store;
mod workout_store;

pub use client_store::ClientStore;
#[cfg(test)]
pub use client_store::MockClientStore;
#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{
    ChatUser, IncomingUpdate, InlineButton, InlineKeyboard, MessengerPort, OutgoingReply,
    UpdateKind,
};
#[cfg(test)]
pub use trainer_store::MockTrainerStore;
pub use trainer_store::TrainerStore;
#[cfg(test)]
pub use workout_store::MockWorkoutStore;
pub use workout_store::WorkoutStore;
