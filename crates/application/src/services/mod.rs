//! Application services - Use case implementations

mod bot_service;
mod client_service;
pub mod keyboards;
pub mod reply_formatter;
mod statistics_service;
mod trainer_service;
mod workout_service;

pub use bot_service::{BotService, BotServiceConfig, DEFAULT_ROSTER_SIZE, DEFAULT_UPCOMING_LIMIT};
pub use client_service::{
    ClientOverview, ClientService, ClientServiceConfig, DEFAULT_MAX_CLIENTS_PER_TRAINER,
};
pub use statistics_service::{StatisticsService, compute as compute_statistics};
pub use trainer_service::TrainerService;
pub use workout_service::WorkoutService;
