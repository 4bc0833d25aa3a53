//! Bot API client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    error::TelegramError,
    types::{
        AnswerCallbackQueryParams, ApiResponse, BotCommandSpec, DeleteWebhookParams,
        EditMessageTextParams, GetUpdatesParams, Message, SendMessageParams, SetMyCommandsParams,
        Update, User,
    },
};

/// Client configuration
#[derive(Clone)]
pub struct TelegramClientConfig {
    /// Bot token from @BotFather
    pub bot_token: SecretString,
    /// API root (default: <https://api.telegram.org>)
    pub base_url: String,
    /// How long `getUpdates` waits for new updates
    pub poll_timeout_secs: u64,
    /// Timeout for ordinary calls; long polls get this on top of the poll timeout
    pub request_timeout_secs: u64,
}

impl TelegramClientConfig {
    /// Configuration with defaults for everything but the token
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: SecretString::from(bot_token.into()),
            base_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
            request_timeout_secs: 10,
        }
    }

    /// Point at a different API root (local Bot API server, tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the long-polling timeout
    #[must_use]
    pub const fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Set the ordinary request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for TelegramClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClientConfig")
            .field("bot_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Client for the Telegram Bot API
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    config: TelegramClientConfig,
}

impl TelegramClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// initialized.
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        if config.bot_token.expose_secret().trim().is_empty() {
            return Err(TelegramError::configuration("bot_token is required"));
        }
        if config.request_timeout_secs == 0 {
            return Err(TelegramError::configuration(
                "request_timeout_secs must be at least 1",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TelegramError::configuration(e.without_url().to_string()))?;

        Ok(Self { http, config })
    }

    /// The configured long-polling timeout
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.config.poll_timeout_secs)
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bot_token.expose_secret()
        )
    }

    /// POST a method call and unwrap the response envelope
    async fn call<P, R>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.http.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let envelope: ApiResponse<R> =
            serde_json::from_str(&body).map_err(|e| TelegramError::InvalidResponse {
                status,
                detail: e.to_string(),
            })?;
        envelope.into_result(status)
    }

    /// Fetch the bot's own account; doubles as a token check
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long-poll for updates after `offset`
    ///
    /// Passing `offset` acknowledges every update with a smaller id.
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            limit: None,
            timeout: self.config.poll_timeout_secs,
            allowed_updates: allowed_updates(),
        };
        let wait = Duration::from_secs(self.config.poll_timeout_secs + self.config.request_timeout_secs);

        let updates: Vec<Update> = self.call("getUpdates", &params, Some(wait)).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }
        Ok(updates)
    }

    /// Acknowledge updates before `offset` with a non-blocking poll
    ///
    /// Anything returned is left unacknowledged and will be delivered again.
    #[instrument(skip(self))]
    pub async fn confirm_updates(&self, offset: i64) -> Result<(), TelegramError> {
        let params = GetUpdatesParams {
            offset: Some(offset),
            limit: Some(1),
            timeout: 0,
            allowed_updates: allowed_updates(),
        };
        let _: Vec<Update> = self.call("getUpdates", &params, None).await?;
        Ok(())
    }

    /// Send a new message
    #[instrument(skip(self, params), fields(chat_id = params.chat_id))]
    pub async fn send_message(&self, params: &SendMessageParams) -> Result<Message, TelegramError> {
        debug!(text_len = params.text.len(), "Sending message");
        self.call("sendMessage", params, None).await
    }

    /// Replace the text and keyboard of an existing message
    #[instrument(skip(self, params), fields(chat_id = params.chat_id, message_id = params.message_id))]
    pub async fn edit_message_text(
        &self,
        params: &EditMessageTextParams,
    ) -> Result<Message, TelegramError> {
        self.call("editMessageText", params, None).await
    }

    /// Acknowledge a button press, optionally with a toast
    #[instrument(skip(self))]
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<String>,
    ) -> Result<bool, TelegramError> {
        let params = AnswerCallbackQueryParams {
            callback_query_id: callback_query_id.to_string(),
            text,
        };
        self.call("answerCallbackQuery", &params, None).await
    }

    /// Remove a webhook so that `getUpdates` is accepted
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, TelegramError> {
        self.call(
            "deleteWebhook",
            &DeleteWebhookParams {
                drop_pending_updates,
            },
            None,
        )
        .await
    }

    /// Replace the command menu
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub async fn set_my_commands(&self, commands: Vec<BotCommandSpec>) -> Result<bool, TelegramError> {
        self.call("setMyCommands", &SetMyCommandsParams { commands }, None)
            .await
    }
}

fn allowed_updates() -> Vec<String> {
    vec!["message".to_string(), "callback_query".to_string()]
}
