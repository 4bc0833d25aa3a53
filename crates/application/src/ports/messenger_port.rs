//! Messenger port - Interface to the chat platform
//!
//! The bot receives updates (typed text or button presses) and answers with
//! HTML-formatted replies carrying optional inline keyboards.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::ChatUserId;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Sender of an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: ChatUserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ChatUser {
    #[must_use]
    pub const fn new(id: ChatUserId) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// Payload of an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateKind {
    /// A typed message
    Text { message_id: i64, text: String },
    /// A press on an inline keyboard button
    Callback {
        callback_id: String,
        /// Message the keyboard was attached to
        message_id: Option<i64>,
        data: String,
    },
}

/// One inbound event from the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingUpdate {
    /// Monotonic id used to acknowledge updates
    pub update_id: i64,
    pub chat_id: i64,
    pub user: ChatUser,
    pub kind: UpdateKind,
}

/// A button on an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    #[must_use]
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Rows of buttons attached to a reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    #[must_use]
    pub fn row(mut self, buttons: Vec<InlineButton>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Append a row with a single button
    #[must_use]
    pub fn button(self, text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        self.row(vec![InlineButton::new(text, callback_data)])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every callback token on the keyboard, row by row
    pub fn callback_data(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| button.callback_data.as_str())
    }
}

/// A reply to deliver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingReply {
    pub chat_id: i64,
    /// HTML-formatted text
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
    /// Edit this message instead of sending a new one
    pub edit_message_id: Option<i64>,
}

impl OutgoingReply {
    #[must_use]
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
            edit_message_id: None,
        }
    }

    #[must_use]
    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = (!keyboard.is_empty()).then_some(keyboard);
        self
    }

    #[must_use]
    pub const fn editing(mut self, message_id: Option<i64>) -> Self {
        self.edit_message_id = message_id;
        self
    }
}

/// Port for the chat platform
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Fetch updates newer than `offset`, waiting up to the configured poll timeout
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<IncomingUpdate>, ApplicationError>;

    /// Acknowledge every update before `offset` without waiting for new ones
    async fn confirm_updates(&self, offset: i64) -> Result<(), ApplicationError>;

    /// Deliver a reply, editing in place when `edit_message_id` is set
    async fn send(&self, reply: &OutgoingReply) -> Result<(), ApplicationError>;

    /// Stop the client's loading indicator for a button press
    async fn acknowledge_callback(
        &self,
        callback_id: &str,
        notice: Option<String>,
    ) -> Result<(), ApplicationError>;

    /// Whether the user may talk to the bot
    fn is_allowed(&self, user: ChatUserId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keyboard_is_dropped() {
        let reply = OutgoingReply::new(1, "hi").with_keyboard(InlineKeyboard::new());
        assert!(reply.keyboard.is_none());
    }

    #[test]
    fn keyboard_builder_skips_empty_rows() {
        let keyboard = InlineKeyboard::new()
            .row(vec![])
            .button("A", "a")
            .row(vec![InlineButton::new("B", "b"), InlineButton::new("C", "c")]);
        assert_eq!(keyboard.rows.len(), 2);
        assert_eq!(keyboard.callback_data().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn update_kind_is_tagged() {
        let kind = UpdateKind::Callback {
            callback_id: "cb".to_string(),
            message_id: Some(5),
            data: "stats".to_string(),
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains(r#""type":"callback""#));
    }
}
