//! Client roster management

use std::{fmt, sync::Arc};

use domain::{
    Attendance, Client, ClientId, DomainError, NewClient, SearchQuery, TrainerId, Workout,
};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ClientStore, WorkoutStore},
};

/// Default cap on clients per trainer
pub const DEFAULT_MAX_CLIENTS_PER_TRAINER: u32 = 1000;

/// Number of recent workouts shown on a client card
const RECENT_WORKOUTS: u32 = 3;

/// Configuration for the client service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientServiceConfig {
    pub max_clients_per_trainer: u32,
}

impl Default for ClientServiceConfig {
    fn default() -> Self {
        Self {
            max_clients_per_trainer: DEFAULT_MAX_CLIENTS_PER_TRAINER,
        }
    }
}

/// Everything shown on a client card
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOverview {
    pub client: Client,
    pub attendance: Attendance,
    /// Most recently scheduled first
    pub recent_workouts: Vec<Workout>,
}

/// Service for a trainer's clients
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    workouts: Arc<dyn WorkoutStore>,
    config: ClientServiceConfig,
}

impl fmt::Debug for ClientService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ClientService {
    #[must_use]
    pub fn new(
        clients: Arc<dyn ClientStore>,
        workouts: Arc<dyn WorkoutStore>,
        config: ClientServiceConfig,
    ) -> Self {
        Self {
            clients,
            workouts,
            config,
        }
    }

    #[must_use]
    pub const fn max_clients(&self) -> u32 {
        self.config.max_clients_per_trainer
    }

    /// Fail with `LimitExceeded` when the trainer cannot add another client
    pub async fn ensure_capacity(&self, trainer_id: TrainerId) -> Result<(), ApplicationError> {
        let count = self.clients.count(trainer_id).await?;
        if count >= self.config.max_clients_per_trainer {
            return Err(ApplicationError::LimitExceeded(format!(
                "trainer {trainer_id} already has {count} clients (max {})",
                self.config.max_clients_per_trainer
            )));
        }
        Ok(())
    }

    /// Create a client for the trainer
    #[instrument(skip(self, client), fields(first_name = %client.first_name))]
    pub async fn create(
        &self,
        trainer_id: TrainerId,
        client: &NewClient,
    ) -> Result<Client, ApplicationError> {
        self.ensure_capacity(trainer_id).await?;
        let created = self.clients.create(trainer_id, client).await?;
        info!(client_id = %created.id, "Client created");
        Ok(created)
    }

    /// Get one of the trainer's clients
    pub async fn get(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Client, ApplicationError> {
        self.clients
            .get(trainer_id, client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", client_id).into())
    }

    /// Client card with attendance and recent workouts
    pub async fn overview(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<ClientOverview, ApplicationError> {
        let client = self.get(trainer_id, client_id).await?;
        let history = self
            .workouts
            .list_for_client(trainer_id, client_id, u32::MAX)
            .await?;
        let attendance = Attendance::from_workouts(&history);
        let recent_workouts = history.into_iter().take(RECENT_WORKOUTS as usize).collect();
        Ok(ClientOverview {
            client,
            attendance,
            recent_workouts,
        })
    }

    /// All clients, newest first
    pub async fn list(&self, trainer_id: TrainerId) -> Result<Vec<Client>, ApplicationError> {
        self.clients.list(trainer_id).await
    }

    pub async fn count(&self, trainer_id: TrainerId) -> Result<u32, ApplicationError> {
        self.clients.count(trainer_id).await
    }

    /// Clients matching a name fragment
    pub async fn search(
        &self,
        trainer_id: TrainerId,
        query: &SearchQuery,
    ) -> Result<Vec<Client>, ApplicationError> {
        self.clients.search(trainer_id, query).await
    }

    /// Delete a client and their workouts
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        trainer_id: TrainerId,
        client_id: ClientId,
    ) -> Result<Client, ApplicationError> {
        let client = self.get(trainer_id, client_id).await?;
        if !self.clients.delete(trainer_id, client_id).await? {
            return Err(DomainError::not_found("Client", client_id).into());
        }
        info!(client_id = %client_id, "Client deleted");
        Ok(client)
    }
}
