//! Per-user dialogue sessions

use std::collections::HashMap;

use chrono::NaiveDateTime;
use domain::ChatUserId;
use parking_lot::Mutex;
use tracing::debug;

use super::field::FieldSpec;
use super::flows::FlowId;
use super::session::{DialogueError, DialogueSession, SessionContext, SubmitOutcome};

/// Active sessions keyed by chat user
///
/// The lock is held only for one synchronous step, never across an await.
/// Starting a flow replaces whatever the user had open; completing or
/// cancelling removes the entry.
#[derive(Debug, Default)]
pub struct DialogueRegistry {
    sessions: Mutex<HashMap<ChatUserId, DialogueSession>>,
}

impl DialogueRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session and return its first step
    pub fn start(
        &self,
        user: ChatUserId,
        flow: FlowId,
        context: SessionContext,
    ) -> Option<&'static FieldSpec> {
        let session = DialogueSession::start(flow, context);
        let first = session.current_field();
        if let Some(previous) = self.sessions.lock().insert(user, session) {
            debug!(user = %user, replaced = %previous.flow(), "Replaced active dialogue");
        }
        first
    }

    /// Feed input to the user's active session
    pub fn submit(
        &self,
        user: ChatUserId,
        raw: &str,
        now: NaiveDateTime,
    ) -> Result<SubmitOutcome, DialogueError> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(&user).ok_or(DialogueError::NoSession)?;
        let outcome = session.submit(raw, now)?;
        if matches!(outcome, SubmitOutcome::Completed(_)) {
            sessions.remove(&user);
        }
        Ok(outcome)
    }

    /// Discard the user's session; returns whether one existed
    pub fn cancel(&self, user: ChatUserId) -> bool {
        let removed = self.sessions.lock().remove(&user).is_some();
        if removed {
            debug!(user = %user, "Dialogue cancelled");
        }
        removed
    }

    #[must_use]
    pub fn is_active(&self, user: ChatUserId) -> bool {
        self.sessions.lock().contains_key(&user)
    }

    /// Flow and pending step of the user's session
    #[must_use]
    pub fn current(&self, user: ChatUserId) -> Option<(FlowId, &'static FieldSpec)> {
        let sessions = self.sessions.lock();
        let session = sessions.get(&user)?;
        Some((session.flow(), session.current_field()?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
