//! Dialogue state sequencer
//!
//! Multi-step conversations (client intake, workout scheduling, client
//! search) run as strictly forward state machines. Each step validates one
//! field; the last accepted step yields the collected fields exactly once.

mod field;
mod flows;
mod records;
mod registry;
mod session;

pub use field::{
    CLIENT_SELECTION_PREFIX, FieldKind, FieldName, FieldSpec, FieldValue, MSG_CHOOSE_FROM_MENU,
};
pub use flows::FlowId;
pub use registry::DialogueRegistry;
pub use session::{
    CollectedFields, CompletedDialogue, DialogueError, DialogueSession, SessionContext,
    SubmitOutcome,
};
