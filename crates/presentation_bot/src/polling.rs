//! Long-polling loop
//!
//! A single task fetches updates and hands them to the dispatcher one at a
//! time, so a user's messages are always processed in order.

use std::{future::Future, sync::Arc, time::Duration};

use application::{
    BotService,
    error::ApplicationError,
    ports::{IncomingUpdate, MessengerPort},
};
use tracing::{debug, info, warn};

/// Pause after a failed fetch
pub const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Drives the dispatcher from the messenger's update stream
pub struct Poller {
    messenger: Arc<dyn MessengerPort>,
    bot: Arc<BotService>,
    error_backoff: Duration,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("bot", &self.bot)
            .field("error_backoff", &self.error_backoff)
            .finish_non_exhaustive()
    }
}

/// Offset that acknowledges every update in the batch
pub fn next_offset(updates: &[IncomingUpdate], current: Option<i64>) -> Option<i64> {
    updates
        .iter()
        .map(|update| update.update_id + 1)
        .max()
        .max(current)
}

impl Poller {
    #[must_use]
    pub fn new(messenger: Arc<dyn MessengerPort>, bot: Arc<BotService>) -> Self {
        Self {
            messenger,
            bot,
            error_backoff: DEFAULT_ERROR_BACKOFF,
        }
    }

    #[must_use]
    pub const fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    /// Fetch one batch and process it; returns the offset for the next fetch
    pub async fn poll_once(&self, offset: Option<i64>) -> Result<Option<i64>, ApplicationError> {
        let updates = self.messenger.fetch_updates(offset).await?;
        Ok(self.process(updates, offset).await)
    }

    /// Hand a batch to the dispatcher in order
    ///
    /// A failing update is logged and skipped so it cannot block the queue.
    async fn process(&self, updates: Vec<IncomingUpdate>, offset: Option<i64>) -> Option<i64> {
        if updates.is_empty() {
            return offset;
        }

        debug!(count = updates.len(), "Processing updates");
        let next = next_offset(&updates, offset);
        for update in updates {
            let update_id = update.update_id;
            if let Err(e) = self.bot.handle(update).await {
                warn!(update_id, error = %e, "Failed to handle update");
            }
        }
        next
    }

    /// Poll until `shutdown` resolves
    ///
    /// Only the wait for updates is interrupted; a fetched batch is always
    /// processed and acknowledged before returning.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        info!("Polling for updates");
        let mut offset = None;

        loop {
            let fetched = tokio::select! {
                biased;
                () = &mut shutdown => break,
                result = self.messenger.fetch_updates(offset) => result,
            };

            match fetched {
                Ok(updates) => offset = self.process(updates, offset).await,
                Err(e) => {
                    warn!(
                        error = %e,
                        backoff_secs = self.error_backoff.as_secs(),
                        "Fetching updates failed"
                    );
                    tokio::select! {
                        biased;
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(self.error_backoff) => {},
                    }
                },
            }
        }

        if let Some(offset) = offset {
            if let Err(e) = self.messenger.confirm_updates(offset).await {
                warn!(offset, error = %e, "Failed to confirm processed updates");
            }
        }
        info!("Polling stopped");
    }
}
