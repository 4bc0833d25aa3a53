//! Telegram Bot API integration
//!
//! A thin client over the HTTPS Bot API: long polling with `getUpdates`,
//! HTML messages with inline keyboards, in-place edits and callback
//! acknowledgements.
//!
//! # Example
//!
//! ```no_run
//! use integration_telegram::{SendMessageParams, TelegramClient, TelegramClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TelegramClient::new(TelegramClientConfig::new("123456:ABC-DEF"))?;
//!
//! let me = client.get_me().await?;
//! println!("Running as @{}", me.username.unwrap_or_default());
//!
//! for update in client.get_updates(None).await? {
//!     if let Some(message) = update.message {
//!         client
//!             .send_message(&SendMessageParams::html(message.chat.id, "<b>Привет!</b>"))
//!             .await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod error;
mod types;

pub use client::{TelegramClient, TelegramClientConfig};
pub use error::TelegramError;
pub use types::{
    AnswerCallbackQueryParams, ApiResponse, BotCommandSpec, CallbackQuery, Chat,
    DeleteWebhookParams, EditMessageTextParams, GetUpdatesParams, InlineKeyboardButton,
    InlineKeyboardMarkup, Message, ParseMode, ResponseParameters, SendMessageParams,
    SetMyCommandsParams, Update, User,
};
