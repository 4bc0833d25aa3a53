//! A single user's in-progress dialogue

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use domain::{ClientId, SKIP_TOKEN, TrainerId};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::field::{FieldName, FieldSpec, FieldValue};
use super::flows::FlowId;

/// Errors produced while driving a dialogue
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DialogueError {
    /// Input rejected by the current step; the session did not move
    #[error("{message}")]
    Invalid { field: FieldName, message: String },

    /// Input arrived after the dialogue finished
    #[error("dialogue already finished")]
    Closed,

    /// No dialogue is active for this user
    #[error("no active dialogue")]
    NoSession,

    /// A completed dialogue lacks a field its record requires
    #[error("completed {flow} dialogue is missing {field}")]
    Incomplete { flow: FlowId, field: FieldName },

    /// Record requested from a dialogue of another flow
    #[error("expected a {expected} dialogue, got {actual}")]
    WrongFlow { expected: FlowId, actual: FlowId },
}

/// Facts about the trainer that some steps validate against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub trainer_id: TrainerId,
    pub allowed_clients: Vec<ClientId>,
}

impl SessionContext {
    #[must_use]
    pub const fn new(trainer_id: TrainerId) -> Self {
        Self {
            trainer_id,
            allowed_clients: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clients(mut self, clients: Vec<ClientId>) -> Self {
        self.allowed_clients = clients;
        self
    }

    #[must_use]
    pub fn allows_client(&self, id: ClientId) -> bool {
        self.allowed_clients.contains(&id)
    }
}

/// Field name → validated value, or `None` for an explicitly absent field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedFields(BTreeMap<FieldName, Option<FieldValue>>);

impl CollectedFields {
    /// Value of a field, `None` when absent or never collected
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&FieldValue> {
        self.0.get(&name).and_then(Option::as_ref)
    }

    /// Whether the field was visited, including explicit skips
    #[must_use]
    pub fn contains(&self, name: FieldName) -> bool {
        self.0.contains_key(&name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn record(&mut self, name: FieldName, value: Option<FieldValue>) {
        self.0.insert(name, value);
    }

    /// Outbound map keyed by exact field names; absent fields are `null`
    #[must_use]
    pub fn to_field_map(&self) -> BTreeMap<&'static str, Value> {
        self.0
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str(),
                    value.as_ref().map_or(Value::Null, FieldValue::to_json),
                )
            })
            .collect()
    }
}

/// What happened after an accepted input
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Advanced; ask this step next
    Next(&'static FieldSpec),
    /// Past the last step
    Completed(CompletedDialogue),
}

/// The result of a finished dialogue
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDialogue {
    pub flow: FlowId,
    pub context: SessionContext,
    pub fields: CollectedFields,
}

impl CompletedDialogue {
    /// Outbound field map; scheduling also carries the trainer id
    #[must_use]
    pub fn field_map(&self) -> BTreeMap<&'static str, Value> {
        let mut map = self.fields.to_field_map();
        if self.flow == FlowId::WorkoutScheduling {
            map.insert("trainer_id", Value::from(self.context.trainer_id.as_i64()));
        }
        map
    }
}

/// Strictly forward state machine for one flow
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueSession {
    flow: FlowId,
    step: usize,
    collected: CollectedFields,
    context: SessionContext,
    finished: bool,
}

impl DialogueSession {
    /// Start a flow at its first step with nothing collected
    #[must_use]
    pub fn start(flow: FlowId, context: SessionContext) -> Self {
        debug!(flow = %flow, trainer_id = %context.trainer_id, "Dialogue started");
        Self {
            flow,
            step: 0,
            collected: CollectedFields::default(),
            context,
            finished: false,
        }
    }

    #[must_use]
    pub const fn flow(&self) -> FlowId {
        self.flow
    }

    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub const fn collected(&self) -> &CollectedFields {
        &self.collected
    }

    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Step awaiting input, `None` once finished
    #[must_use]
    pub fn current_field(&self) -> Option<&'static FieldSpec> {
        if self.finished {
            return None;
        }
        self.flow.steps().get(self.step)
    }

    /// Feed one input to the current step
    ///
    /// On a skippable step the skip token records the step's skip value.
    /// Anywhere else it is ordinary input. A rejected input leaves the
    /// session exactly as it was.
    pub fn submit(
        &mut self,
        raw: &str,
        now: NaiveDateTime,
    ) -> Result<SubmitOutcome, DialogueError> {
        let spec = self.current_field().ok_or(DialogueError::Closed)?;

        let value = if spec.skippable && raw.trim() == SKIP_TOKEN {
            debug!(flow = %self.flow, field = %spec.name, "Step skipped");
            spec.skip_value()
        } else {
            spec.parse(raw, &self.context, now).map_err(|message| {
                debug!(flow = %self.flow, field = %spec.name, "Step input rejected");
                DialogueError::Invalid {
                    field: spec.name,
                    message,
                }
            })?
        };

        self.collected.record(spec.name, value);
        self.step += 1;

        match self.flow.steps().get(self.step) {
            Some(next) => Ok(SubmitOutcome::Next(next)),
            None => {
                self.finished = true;
                debug!(flow = %self.flow, fields = self.collected.len(), "Dialogue completed");
                Ok(SubmitOutcome::Completed(CompletedDialogue {
                    flow: self.flow,
                    context: self.context.clone(),
                    fields: self.collected.clone(),
                }))
            },
        }
    }
}
