//! Telegram messenger adapter
//!
//! Implements the `MessengerPort` trait using the Telegram integration crate.

use std::collections::HashSet;

use application::error::ApplicationError;
use application::ports::{
    ChatUser, IncomingUpdate, InlineKeyboard, MessengerPort, OutgoingReply, UpdateKind,
};
use async_trait::async_trait;
use domain::{BotCommand, ChatUserId};
use integration_telegram::{
    BotCommandSpec, EditMessageTextParams, InlineKeyboardButton, InlineKeyboardMarkup,
    SendMessageParams, TelegramClient, TelegramClientConfig, TelegramError, Update, User,
};
use tracing::{debug, info, instrument, warn};

use crate::config::TelegramAppConfig;

/// Adapter that implements `MessengerPort` using `TelegramClient`
pub struct TelegramMessengerAdapter {
    client: TelegramClient,
    /// Allowed user ids; empty allows everyone
    whitelist: HashSet<i64>,
}

impl TelegramMessengerAdapter {
    /// Create a new Telegram messenger adapter
    pub fn new(config: TelegramClientConfig) -> Result<Self, ApplicationError> {
        let client = TelegramClient::new(config).map_err(map_telegram_error)?;
        Ok(Self {
            client,
            whitelist: HashSet::new(),
        })
    }

    /// Build the adapter from the `telegram` configuration section
    pub fn from_config(config: &TelegramAppConfig) -> Result<Self, ApplicationError> {
        let token = config.bot_token.clone().ok_or_else(|| {
            ApplicationError::Configuration(
                "telegram.bot_token is not set (FITCOACH_TELEGRAM__BOT_TOKEN)".to_string(),
            )
        })?;
        let client_config = TelegramClientConfig {
            bot_token: token,
            base_url: config.api_base_url.clone(),
            poll_timeout_secs: config.poll_timeout_secs,
            request_timeout_secs: config.request_timeout_secs,
        };
        Ok(Self::new(client_config)?.with_whitelist(config.whitelist.iter().copied()))
    }

    /// Restrict the bot to the given user ids
    #[must_use]
    pub fn with_whitelist(mut self, whitelist: impl IntoIterator<Item = i64>) -> Self {
        self.whitelist = whitelist.into_iter().collect();
        self
    }

    /// Get a reference to the underlying client
    #[must_use]
    pub const fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Verify the token, switch to long polling and publish the command menu
    ///
    /// Returns the bot's username.
    #[instrument(skip(self))]
    pub async fn prepare(&self) -> Result<String, ApplicationError> {
        let me = self.client.get_me().await.map_err(map_telegram_error)?;

        self.client
            .delete_webhook(false)
            .await
            .map_err(map_telegram_error)?;

        let commands = BotCommand::MENU
            .iter()
            .filter_map(|command| {
                command.description().map(|description| BotCommandSpec {
                    command: command.name().to_string(),
                    description: description.to_string(),
                })
            })
            .collect();
        // A missing menu only costs discoverability
        if let Err(e) = self.client.set_my_commands(commands).await {
            warn!(error = %e, "Failed to register command menu");
        }

        let username = me.username.unwrap_or(me.first_name);
        info!(bot = %username, "Telegram bot ready");
        Ok(username)
    }
}

impl std::fmt::Debug for TelegramMessengerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramMessengerAdapter")
            .field("client", &self.client)
            .field("whitelist", &format!("[{} entries]", self.whitelist.len()))
            .finish()
    }
}

#[async_trait]
impl MessengerPort for TelegramMessengerAdapter {
    async fn fetch_updates(
        &self,
        offset: Option<i64>,
    ) -> Result<Vec<IncomingUpdate>, ApplicationError> {
        let updates = self
            .client
            .get_updates(offset)
            .await
            .map_err(map_telegram_error)?;

        Ok(updates.into_iter().filter_map(to_incoming).collect())
    }

    async fn confirm_updates(&self, offset: i64) -> Result<(), ApplicationError> {
        self.client
            .confirm_updates(offset)
            .await
            .map_err(map_telegram_error)
    }

    #[instrument(skip(self, reply), fields(chat_id = reply.chat_id, edit = reply.edit_message_id.is_some()))]
    async fn send(&self, reply: &OutgoingReply) -> Result<(), ApplicationError> {
        let markup = reply.keyboard.as_ref().map(to_markup);

        if let Some(message_id) = reply.edit_message_id {
            let mut params = EditMessageTextParams::html(reply.chat_id, message_id, &reply.text);
            params.reply_markup.clone_from(&markup);

            match self.client.edit_message_text(&params).await {
                Ok(_) => return Ok(()),
                Err(e) if e.is_message_not_modified() => {
                    debug!("Edit left message unchanged");
                    return Ok(());
                },
                Err(e) => {
                    warn!(error = %e, message_id, "Edit failed, sending a new message");
                },
            }
        }

        let mut params = SendMessageParams::html(reply.chat_id, &reply.text);
        params.reply_markup = markup;
        self.client
            .send_message(&params)
            .await
            .map_err(map_telegram_error)?;
        Ok(())
    }

    async fn acknowledge_callback(
        &self,
        callback_id: &str,
        notice: Option<String>,
    ) -> Result<(), ApplicationError> {
        self.client
            .answer_callback_query(callback_id, notice)
            .await
            .map_err(map_telegram_error)?;
        Ok(())
    }

    fn is_allowed(&self, user: ChatUserId) -> bool {
        self.whitelist.is_empty() || self.whitelist.contains(&user.as_i64())
    }
}

fn map_telegram_error(err: TelegramError) -> ApplicationError {
    match err {
        TelegramError::Configuration(msg) => {
            ApplicationError::Configuration(format!("Telegram: {msg}"))
        },
        TelegramError::Api {
            error_code: 401, ..
        } => ApplicationError::Configuration("Telegram rejected the bot token".to_string()),
        e => ApplicationError::Messenger(e.to_string()),
    }
}

fn to_chat_user(user: User) -> ChatUser {
    ChatUser {
        id: ChatUserId::new(user.id),
        username: user.username,
        first_name: Some(user.first_name),
        last_name: user.last_name,
    }
}

/// Convert a wire update, dropping kinds the bot does not handle
fn to_incoming(update: Update) -> Option<IncomingUpdate> {
    let update_id = update.update_id;

    if let Some(query) = update.callback_query {
        let Some(data) = query.data else {
            debug!(update_id, "Callback without data ignored");
            return None;
        };
        let (chat_id, message_id) = query
            .message
            .as_ref()
            .map_or((query.from.id, None), |m| (m.chat.id, Some(m.message_id)));
        return Some(IncomingUpdate {
            update_id,
            chat_id,
            user: to_chat_user(query.from),
            kind: UpdateKind::Callback {
                callback_id: query.id,
                message_id,
                data,
            },
        });
    }

    let message = update.message?;
    let (Some(from), Some(text)) = (message.from, message.text) else {
        debug!(update_id, "Non-text message ignored");
        return None;
    };
    Some(IncomingUpdate {
        update_id,
        chat_id: message.chat.id,
        user: to_chat_user(from),
        kind: UpdateKind::Text {
            message_id: message.message_id,
            text,
        },
    })
}

fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.text.clone(),
                        callback_data: button.callback_data.clone(),
                    })
                    .collect()
            })
            .collect(),
    }
}
