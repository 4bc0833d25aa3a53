//! Error types for the Telegram integration

use thiserror::Error;

/// Errors that can occur while talking to the Bot API
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// The Bot API answered with `ok: false`
    #[error("Telegram API error {error_code}: {description}")]
    Api {
        /// Error code reported by the API (mirrors the HTTP status)
        error_code: i32,
        /// Human-readable description
        description: String,
        /// Seconds to wait before retrying, on flood control
        retry_after: Option<u64>,
    },

    /// The response body was not a Bot API envelope
    #[error("Unexpected response (HTTP {status}): {detail}")]
    InvalidResponse {
        /// HTTP status of the response
        status: u16,
        /// Parse failure detail
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// The request URL embeds the bot token, so it is stripped before the error
// can reach a log line.
impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl TelegramError {
    /// Create an API error
    #[must_use]
    pub fn api(error_code: i32, description: impl Into<String>) -> Self {
        Self::Api {
            error_code,
            description: description.into(),
            retry_after: None,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// An edit that would leave the message unchanged
    #[must_use]
    pub fn is_message_not_modified(&self) -> bool {
        matches!(
            self,
            Self::Api { error_code: 400, description, .. }
                if description.contains("message is not modified")
        )
    }

    /// Whether repeating the request later may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { error_code, .. } => *error_code == 429 || *error_code >= 500,
            Self::InvalidResponse { status, .. } => *status >= 500,
            Self::Configuration(_) => false,
        }
    }

    /// Server-requested back-off in seconds
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
