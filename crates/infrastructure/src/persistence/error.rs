//! Shared error mapping for the sqlx persistence layer

use application::error::ApplicationError;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format of local wall-clock times
pub(crate) const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, ApplicationError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApplicationError::Internal(format!("Invalid datetime: {e}")))
}

/// Parse a local wall-clock column
pub(crate) fn parse_local(s: &str) -> Result<NaiveDateTime, ApplicationError> {
    NaiveDateTime::parse_from_str(s, LOCAL_DATETIME_FORMAT)
        .map_err(|e| ApplicationError::Internal(format!("Invalid local datetime '{s}': {e}")))
}

pub(crate) fn format_local(at: NaiveDateTime) -> String {
    at.format(LOCAL_DATETIME_FORMAT).to_string()
}

/// Convert a stored value that failed domain validation
pub(crate) fn corrupt(column: &str, detail: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Internal(format!("Corrupt {column} column: {detail}"))
}
