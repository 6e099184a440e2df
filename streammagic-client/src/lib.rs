//! # StreamMagic client contract
//!
//! Types and traits for talking to Cambridge Audio network receivers running
//! the StreamMagic platform.
//!
//! ```rust,ignore
//! use streammagic::{MemoryClient, StreamMagicClient};
//!
//! let client = MemoryClient::from_json(include_str!("cxn.json"))?;
//! println!("{} is {}", client.info().name, client.play_state().state);
//! client.play().await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! StreamMagicClient (trait)
//!     ├── cached snapshots: info / state / play_state / now_playing / sources
//!     ├── async commands: transport, zone, queue modes
//!     └── push notifications: one callback per ListenerId
//! ```
//!
//! [`MemoryClient`] implements the trait over an in-memory
//! [`DeviceSnapshot`] and records the commands it receives.

pub mod client;
pub mod error;
pub mod memory;
pub mod model;

pub use client::{ListenerId, StateUpdateCallback, StreamMagicClient};
pub use error::{ClientError, Result};
pub use memory::{Command, DeviceSnapshot, MemoryClient};
pub use model::{
    Info, Metadata, NowPlaying, PlayState, RepeatMode, ShuffleMode, Source, State,
    TransportControl,
};
