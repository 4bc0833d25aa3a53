//! Service construction from configuration

use std::sync::Arc;

use application::{
    BotService, BotServiceConfig, ClientService, ClientServiceConfig, StatisticsService,
    TrainerService, WorkoutService,
    error::ApplicationError,
    ports::{ClientStore, MessengerPort, TrainerStore, WorkoutStore},
};
use infrastructure::{AppConfig, SqliteClientStore, SqliteTrainerStore, SqliteWorkoutStore};
use infrastructure::persistence::AsyncDatabase;

/// Build the dispatcher over SQLite stores
pub fn build_bot_service(
    db: &AsyncDatabase,
    messenger: Arc<dyn MessengerPort>,
    config: &AppConfig,
) -> Result<BotService, ApplicationError> {
    let timezone = config
        .scheduling
        .tz()
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

    let trainers: Arc<dyn TrainerStore> = Arc::new(SqliteTrainerStore::new(db.pool().clone()));
    let clients: Arc<dyn ClientStore> = Arc::new(SqliteClientStore::new(db.pool().clone()));
    let workouts: Arc<dyn WorkoutStore> = Arc::new(SqliteWorkoutStore::new(db.pool().clone()));

    let bot_config = BotServiceConfig {
        timezone,
        upcoming_limit: config.scheduling.upcoming_limit,
        roster_size: config.scheduling.roster_size,
        history_limit: config.scheduling.history_limit,
    };

    Ok(BotService::new(
        TrainerService::new(trainers),
        ClientService::new(
            Arc::clone(&clients),
            Arc::clone(&workouts),
            ClientServiceConfig {
                max_clients_per_trainer: config.limits.max_clients_per_trainer,
            },
        ),
        WorkoutService::new(Arc::clone(&workouts), Arc::clone(&clients)),
        StatisticsService::new(clients, workouts),
        messenger,
        bot_config,
    ))
}
