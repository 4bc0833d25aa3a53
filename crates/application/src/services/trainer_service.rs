//! Trainer registration and lookup

use std::{fmt, sync::Arc};

use domain::{ChatUserId, NewTrainer, Trainer};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ChatUser, TrainerStore},
};

/// Service for trainer accounts
#[derive(Clone)]
pub struct TrainerService {
    store: Arc<dyn TrainerStore>,
}

impl fmt::Debug for TrainerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainerService").finish_non_exhaustive()
    }
}

impl TrainerService {
    #[must_use]
    pub fn new(store: Arc<dyn TrainerStore>) -> Self {
        Self { store }
    }

    /// Return the trainer for this chat user, registering them on first contact
    ///
    /// The flag is true when a new registration happened.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn register(&self, user: &ChatUser) -> Result<(Trainer, bool), ApplicationError> {
        if let Some(existing) = self.store.find_by_telegram_id(user.id).await? {
            return Ok((existing, false));
        }

        let new = NewTrainer {
            telegram_id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        };
        let trainer = self.store.create(&new).await?;
        info!(trainer_id = %trainer.id, "Registered new trainer");
        Ok((trainer, true))
    }

    /// The registered trainer, or `NotAuthorized` when `/start` was never run
    pub async fn require(&self, user: ChatUserId) -> Result<Trainer, ApplicationError> {
        self.store
            .find_by_telegram_id(user)
            .await?
            .ok_or_else(|| ApplicationError::NotAuthorized(format!("chat user {user} is not registered")))
    }
}
