//! Trainer storage port

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::{ChatUserId, NewTrainer, Trainer, TrainerId};

use crate::error::ApplicationError;

/// Port for trainer persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TrainerStore: Send + Sync {
    /// Look a trainer up by their chat user id
    async fn find_by_telegram_id(
        &self,
        telegram_id: ChatUserId,
    ) -> Result<Option<Trainer>, ApplicationError>;

    /// Get a trainer by row id
    async fn get(&self, id: TrainerId) -> Result<Option<Trainer>, ApplicationError>;

    /// Register a new trainer
    ///
    /// Fails if the chat user id is already registered.
    async fn create(&self, trainer: &NewTrainer) -> Result<Trainer, ApplicationError>;
}
