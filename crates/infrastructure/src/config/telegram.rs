//! Telegram Bot API configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Telegram integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramAppConfig {
    /// Bot token from @BotFather (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub bot_token: Option<SecretString>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long-polling wait passed to getUpdates
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// HTTP timeout for ordinary requests
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User ids allowed to talk to the bot (empty = allow all)
    #[serde(default)]
    pub whitelist: Vec<i64>,
}

impl std::fmt::Debug for TelegramAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAppConfig")
            .field(
                "bot_token",
                &if self.bot_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("api_base_url", &self.api_base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("whitelist", &format!("[{} entries]", self.whitelist.len()))
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout() -> u64 {
    30
}

const fn default_request_timeout() -> u64 {
    10
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
            request_timeout_secs: default_request_timeout(),
            whitelist: Vec::new(),
        }
    }
}

impl TelegramAppConfig {
    pub(super) fn validate(&self) -> Result<(), config::ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "telegram.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
