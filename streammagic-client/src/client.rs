//! Client contract for a StreamMagic receiver session
//!
//! The session owns the network connection, the command queue and the push
//! notifications. Consumers read cached snapshots synchronously and issue
//! commands asynchronously; timeouts and retries are the session's concern.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Info, NowPlaying, PlayState, RepeatMode, ShuffleMode, Source, State};

/// Callback invoked once per state push from the receiver
pub type StateUpdateCallback = Arc<dyn Fn() + Send + Sync>;

/// Identifies one registered state listener
///
/// A client keeps at most one callback per id. Registering the same id again
/// replaces the callback instead of adding a second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Generate a fresh listener id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session with one StreamMagic receiver
#[async_trait]
pub trait StreamMagicClient: Send + Sync {
    // ========================================================================
    // Cached state
    // ========================================================================

    /// Static unit information
    fn info(&self) -> Info;

    /// Zone state (power, pre-amp, mute, volume, source)
    fn state(&self) -> State;

    /// Playback snapshot
    fn play_state(&self) -> PlayState;

    /// Transport controls currently advertised
    fn now_playing(&self) -> NowPlaying;

    /// Input sources in device order
    fn sources(&self) -> Vec<Source>;

    /// When `play_state().position` was last refreshed
    fn position_last_updated(&self) -> Option<DateTime<Utc>>;

    /// Whether the session is currently connected
    fn is_connected(&self) -> bool;

    // ========================================================================
    // Transport
    // ========================================================================

    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
    async fn play_pause(&self) -> Result<()>;
    async fn next_track(&self) -> Result<()>;
    async fn previous_track(&self) -> Result<()>;

    /// Seek to an absolute position in seconds
    async fn media_seek(&self, position: i64) -> Result<()>;

    // ========================================================================
    // Zone
    // ========================================================================

    /// Set the pre-amp volume (0-100)
    async fn set_volume(&self, volume: i32) -> Result<()>;
    async fn volume_up(&self) -> Result<()>;
    async fn volume_down(&self) -> Result<()>;
    async fn set_mute(&self, mute: bool) -> Result<()>;
    async fn set_source_by_id(&self, source_id: &str) -> Result<()>;
    async fn power_on(&self) -> Result<()>;
    async fn power_off(&self) -> Result<()>;

    // ========================================================================
    // Queue modes
    // ========================================================================

    async fn set_shuffle(&self, mode: ShuffleMode) -> Result<()>;
    async fn set_repeat(&self, mode: RepeatMode) -> Result<()>;

    // ========================================================================
    // Push notifications
    // ========================================================================

    /// Register `callback` under `id`, replacing any callback already held for it
    async fn register_state_update_callback(
        &self,
        id: ListenerId,
        callback: StateUpdateCallback,
    ) -> Result<()>;

    /// Remove the callback registered under `id`; unknown ids are ignored
    async fn unregister_state_update_callback(&self, id: ListenerId) -> Result<()>;
}
