//! Client storage port
//!
//! Clients belong to trainers through a link table; every lookup is scoped to
//! the owning trainer so one trainer can never read another's roster.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::{Client, ClientId, NewClient, SearchQuery, TrainerId};

use crate::error::ApplicationError;

/// Port for client persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Insert a client and link it to the trainer
    async fn create(
        &self,
        trainer_id: TrainerId,
        client: &NewClient,
    ) -> Result<Client, ApplicationError>;

    /// Get a client if it belongs to the trainer
    async fn get(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Option<Client>, ApplicationError>;

    /// All of the trainer's clients, newest first
    async fn list(&self, trainer_id: TrainerId) -> Result<Vec<Client>, ApplicationError>;

    /// Clients whose first or last name contains the query, ordered by first name
    async fn search(
        &self,
        trainer_id: TrainerId,
        query: &SearchQuery,
    ) -> Result<Vec<Client>, ApplicationError>;

    /// Number of clients linked to the trainer
    async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError>;

    /// Delete a client together with its workouts
    ///
    /// Returns false if the client does not exist or belongs to someone else.
    async fn delete(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<bool, ApplicationError>;
}
