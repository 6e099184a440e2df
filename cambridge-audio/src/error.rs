use thiserror::Error;

use crate::logging::LoggingError;

/// Errors raised while setting up or unloading a config entry
#[derive(Error, Debug)]
pub enum SetupError {
    /// Entry data or integration configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Media player error: {0}")]
    Entity(#[from] media_player::EntityError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;
