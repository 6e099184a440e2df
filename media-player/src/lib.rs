//! # Media player platform
//!
//! The host side of the media player abstraction: what an integration must
//! expose, and how the host tracks, refreshes and commands it.
//!
//! ```rust,ignore
//! use media_player::{EntityRegistry, MediaPlayerCommand};
//!
//! let registry = EntityRegistry::new();
//! registry.add_entity(Arc::new(my_player)).await?;
//!
//! let mut published = registry.subscribe();
//! registry.call_service("unit-1", MediaPlayerCommand::MediaPlay).await?;
//! registry.process_pending().await;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! integration entity ── UpdateHandle::schedule_update() ──┐
//!        ▲                                                 ▼
//!        │ call_service()                  EntityRegistry (update queue)
//!        │                                                 │ re-read properties
//!        └──────────────── MediaPlayerCommand              ▼
//!                                             MediaPlayerSnapshot broadcast
//! ```

pub mod entity;
pub mod error;
pub mod feature;
pub mod registry;
pub mod service;
pub mod snapshot;
pub mod state;
pub mod update;

pub use entity::{MediaPlayerEntity, DEFAULT_VOLUME_STEP};
pub use error::{DeviceError, EntityError, Result};
pub use feature::MediaPlayerEntityFeature;
pub use registry::{EntityRegistry, RegistryConfig};
pub use service::{call_service, MediaPlayerCommand};
pub use snapshot::MediaPlayerSnapshot;
pub use state::{DeviceInfo, MediaPlayerDeviceClass, MediaPlayerState, MediaType, RepeatMode};
pub use update::{UpdateHandle, UpdateRequest};
