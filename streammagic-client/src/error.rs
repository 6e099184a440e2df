use thiserror::Error;

/// Errors reported by a StreamMagic client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The receiver did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// No session is established with the receiver
    #[error("Not connected to receiver")]
    NotConnected,

    /// The receiver rejected a command
    #[error("Command {command} failed: {message}")]
    Command { command: String, message: String },

    /// The receiver answered with something we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Convenience constructor for a rejected command
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Command {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
