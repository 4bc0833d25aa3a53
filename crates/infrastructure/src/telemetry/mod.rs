//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`, optionally as JSON lines.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
