//! Bot API wire types
//!
//! Only the fields the bot reads are modelled; unknown fields are ignored
//! on deserialization.

use serde::{Deserialize, Serialize};

use crate::error::TelegramError;

/// Envelope around every Bot API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub ok: bool,
    /// Payload on success
    pub result: Option<T>,
    /// Error code on failure
    pub error_code: Option<i32>,
    /// Error description on failure
    pub description: Option<String>,
    /// Extra failure hints
    pub parameters: Option<ResponseParameters>,
}

/// Hints attached to a failed response
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseParameters {
    /// Seconds to wait after flood control
    pub retry_after: Option<u64>,
}

impl<T> ApiResponse<T> {
    /// Turn the envelope into the payload or a typed error
    ///
    /// `status` is used as the error code when the API omits one.
    pub fn into_result(self, status: u16) -> Result<T, TelegramError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(TelegramError::InvalidResponse {
                status,
                detail: "ok response without result".to_string(),
            }),
            (false, _) => Err(TelegramError::Api {
                error_code: self.error_code.unwrap_or_else(|| i32::from(status)),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
                retry_after: self.parameters.and_then(|p| p.retry_after),
            }),
        }
    }
}

/// A Telegram user or bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Whether this is a bot
    #[serde(default)]
    pub is_bot: bool,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: Option<String>,
    /// Username without the `@`
    pub username: Option<String>,
}

/// A chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique identifier
    pub id: i64,
    /// `private`, `group`, `supergroup` or `channel`
    #[serde(rename = "type")]
    pub kind: String,
}

/// A message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier unique within the chat
    pub message_id: i64,
    /// Sender, absent for channel posts
    pub from: Option<User>,
    /// Chat the message belongs to
    pub chat: Chat,
    /// Unix time the message was sent
    #[serde(default)]
    pub date: i64,
    /// Text of a text message
    pub text: Option<String>,
}

/// A press on an inline keyboard button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Identifier to acknowledge
    pub id: String,
    /// Who pressed the button
    pub from: User,
    /// Message carrying the keyboard, if still accessible
    pub message: Option<Message>,
    /// The button's `callback_data`
    pub data: Option<String>,
}

/// One incoming update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Monotonic update identifier
    pub update_id: i64,
    /// New incoming message
    pub message: Option<Message>,
    /// Inline button press
    pub callback_query: Option<CallbackQuery>,
}

/// Text formatting of outgoing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Telegram's HTML subset
    #[serde(rename = "HTML")]
    Html,
    /// MarkdownV2
    MarkdownV2,
}

/// A button on an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    /// Label
    pub text: String,
    /// Data sent back in the callback query (1-64 bytes)
    pub callback_data: String,
}

/// Inline keyboard attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Parameters of `getUpdates`
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesParams {
    /// First update to return; acknowledges everything before it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of updates to return (1-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Long-polling timeout in seconds
    pub timeout: u64,
    /// Update kinds to receive
    pub allowed_updates: Vec<String>,
}

/// Parameters of `sendMessage`
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    /// Target chat
    pub chat_id: i64,
    /// Message text
    pub text: String,
    /// Formatting mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    /// Inline keyboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessageParams {
    /// An HTML message without keyboard
    #[must_use]
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            reply_markup: None,
        }
    }

    /// Attach an inline keyboard
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

/// Parameters of `editMessageText`
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageTextParams {
    /// Chat of the message
    pub chat_id: i64,
    /// Message to edit
    pub message_id: i64,
    /// New text
    pub text: String,
    /// Formatting mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    /// New inline keyboard; omitting it removes the old one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageTextParams {
    /// Replace a message's text with HTML
    #[must_use]
    pub fn html(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            reply_markup: None,
        }
    }

    /// Attach an inline keyboard
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

/// Parameters of `answerCallbackQuery`
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQueryParams {
    /// Query to acknowledge
    pub callback_query_id: String,
    /// Toast shown to the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Parameters of `deleteWebhook`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteWebhookParams {
    /// Discard updates queued while the webhook was set
    pub drop_pending_updates: bool,
}

/// A command shown in the client's command menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandSpec {
    /// Command name without the slash (1-32 lowercase chars)
    pub command: String,
    /// Description (1-256 chars)
    pub description: String,
}

/// Parameters of `setMyCommands`
#[derive(Debug, Clone, Serialize)]
pub struct SetMyCommandsParams {
    /// The full command list, replacing any previous one
    pub commands: Vec<BotCommandSpec>,
}
