//! # Cambridge Audio media player integration
//!
//! Exposes Cambridge Audio network receivers (StreamMagic platform) as media
//! players. The integration is a thin adapter: state is read from the shared
//! [`streammagic::StreamMagicClient`] session on every query, and commands
//! are forwarded to it.
//!
//! ```rust,ignore
//! use cambridge_audio::{async_setup_entry, ConfigEntry, EntryData};
//! use media_player::{EntityRegistry, MediaPlayerCommand};
//!
//! let registry = EntityRegistry::new();
//! let entry = ConfigEntry::new("entry-1", "Living Room", EntryData::new("192.168.20.218"), client);
//! let unique_id = async_setup_entry(&registry, &entry).await?;
//!
//! registry.call_service(&unique_id, MediaPlayerCommand::MediaPlay).await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! EntityRegistry (host)
//!     ↓ properties / commands
//! CambridgeAudioDevice ── mapping tables
//!     ↓ snapshots / commands        ↑ state push → UpdateHandle
//! StreamMagicClient (shared session)
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod setup;

pub use config::{ConfigEntry, EntryData, IntegrationConfig};
pub use device::{CambridgeAudioDevice, DOMAIN, MANUFACTURER};
pub use error::{Result, SetupError};
pub use logging::{init_logging, init_logging_from_env, LoggingMode};
pub use setup::{async_setup_entry, async_unload_entry};
