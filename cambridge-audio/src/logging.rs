//! Logging setup for the Cambridge Audio integration
//!
//! Hosts that already install a tracing subscriber should skip this module;
//! the integration only emits `tracing` events.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingMode {
    /// No subscriber installed
    #[default]
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with source locations
    Debug,
}

impl LoggingMode {
    /// Parse a mode name as used in `CAMBRIDGE_AUDIO_LOG_MODE`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "silent" => Some(LoggingMode::Silent),
            "development" => Some(LoggingMode::Development),
            "debug" => Some(LoggingMode::Debug),
            _ => None,
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `CAMBRIDGE_AUDIO_LOG_LEVEL`: filter directive (e.g. "cambridge_audio=debug")
/// - `RUST_LOG`: used when the above is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info")?;

            Registry::default()
                .with(fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact())
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug")?;

            Registry::default()
                .with(fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true))
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Initialize logging from `CAMBRIDGE_AUDIO_LOG_MODE`
///
/// Unset or unrecognized values fall back to silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = std::env::var("CAMBRIDGE_AUDIO_LOG_MODE")
        .ok()
        .and_then(|name| LoggingMode::from_name(&name))
        .unwrap_or_default();

    init_logging(mode)
}

fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = std::env::var("CAMBRIDGE_AUDIO_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());

    EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}
