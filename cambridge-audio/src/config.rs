//! Configuration for the Cambridge Audio integration
//!
//! A [`ConfigEntry`] describes one configured receiver together with the
//! client session the host opened for it. [`IntegrationConfig`] holds the
//! settings shared by every entry.

use std::sync::Arc;

use media_player::RegistryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::logging::LoggingMode;

/// User-provided data for one receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    /// Hostname or IP address of the receiver
    pub host: String,
}

impl EntryData {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Parse entry data from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Validate the entry data and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SetupError::Config("Host must not be empty".to_string()));
        }

        if self.host.contains("://") {
            return Err(SetupError::Config(format!(
                "Host must be a hostname or address, not a URL: {}",
                self.host
            )));
        }

        if self.host.chars().any(char::is_whitespace) {
            return Err(SetupError::Config(format!(
                "Host must not contain whitespace: {:?}",
                self.host
            )));
        }

        Ok(())
    }
}

/// A configured receiver and its client session
///
/// The session is shared: the host keeps it alive for as long as the entry
/// is loaded, and the media player only borrows it.
pub struct ConfigEntry<C: ?Sized> {
    pub entry_id: String,
    pub title: String,
    pub data: EntryData,
    pub runtime_data: Arc<C>,
}

impl<C: ?Sized> ConfigEntry<C> {
    pub fn new(
        entry_id: impl Into<String>,
        title: impl Into<String>,
        data: EntryData,
        runtime_data: Arc<C>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            title: title.into(),
            data,
            runtime_data,
        }
    }
}

/// Settings shared by every Cambridge Audio entry
#[derive(Debug, Clone, Default)]
pub struct IntegrationConfig {
    /// Logging mode installed by [`crate::logging::init_logging`]
    /// Default: Silent
    pub logging: LoggingMode,

    /// Registry settings for hosts that embed the integration standalone
    pub registry: RegistryConfig,
}

impl IntegrationConfig {
    /// Create an IntegrationConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an IntegrationConfig that logs verbosely
    pub fn debug() -> Self {
        Self {
            logging: LoggingMode::Debug,
            ..Default::default()
        }
    }

    /// Read overrides from `CAMBRIDGE_AUDIO_LOG_MODE`
    pub fn from_env() -> Self {
        let logging = std::env::var("CAMBRIDGE_AUDIO_LOG_MODE")
            .ok()
            .and_then(|name| LoggingMode::from_name(&name))
            .unwrap_or_default();

        Self {
            logging,
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        self.registry
            .validate()
            .map_err(|e| SetupError::Config(e.to_string()))
    }
}
