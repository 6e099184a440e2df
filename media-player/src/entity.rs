//! The media player entity contract
//!
//! Integrations implement [`MediaPlayerEntity`] to expose a device to the
//! host. Properties are read synchronously whenever the host publishes state
//! and must reflect the device's current state; commands are async and
//! return whatever error the device raised.
//!
//! Every method has a default. Properties default to "unknown" and commands
//! to [`EntityError::NotSupported`], so integrations only implement what the
//! device offers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{EntityError, Result};
use crate::feature::MediaPlayerEntityFeature;
use crate::state::{DeviceInfo, MediaPlayerDeviceClass, MediaPlayerState, MediaType, RepeatMode};
use crate::update::UpdateHandle;

/// Volume change applied by the default `volume_up`/`volume_down`
pub const DEFAULT_VOLUME_STEP: f64 = 0.1;

#[async_trait]
pub trait MediaPlayerEntity: Send + Sync {
    // ========================================================================
    // Identity
    // ========================================================================

    /// Stable id; entities without one cannot be registered
    fn unique_id(&self) -> Option<String> {
        None
    }

    /// Entity name; `None` means the entity takes the device name
    fn name(&self) -> Option<String> {
        None
    }

    fn device_class(&self) -> Option<MediaPlayerDeviceClass> {
        None
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        None
    }

    fn available(&self) -> bool {
        true
    }

    // ========================================================================
    // State
    // ========================================================================

    fn supported_features(&self) -> MediaPlayerEntityFeature {
        MediaPlayerEntityFeature::empty()
    }

    fn state(&self) -> Option<MediaPlayerState> {
        None
    }

    fn source_list(&self) -> Option<Vec<String>> {
        None
    }

    fn source(&self) -> Option<String> {
        None
    }

    fn media_content_type(&self) -> Option<MediaType> {
        None
    }

    fn media_title(&self) -> Option<String> {
        None
    }

    fn media_artist(&self) -> Option<String> {
        None
    }

    fn media_album_name(&self) -> Option<String> {
        None
    }

    fn media_image_url(&self) -> Option<String> {
        None
    }

    /// Duration in seconds
    fn media_duration(&self) -> Option<u32> {
        None
    }

    /// Position in seconds
    fn media_position(&self) -> Option<u32> {
        None
    }

    /// When `media_position` was last valid
    fn media_position_updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn is_volume_muted(&self) -> Option<bool> {
        None
    }

    /// Volume in 0.0..=1.0
    fn volume_level(&self) -> Option<f64> {
        None
    }

    fn shuffle(&self) -> Option<bool> {
        None
    }

    fn repeat(&self) -> Option<RepeatMode> {
        None
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Called once the entity is registered with the host
    async fn added_to_host(&self, _updates: UpdateHandle) -> Result<()> {
        Ok(())
    }

    /// Called before the entity is removed from the host
    async fn will_remove_from_host(&self) -> Result<()> {
        Ok(())
    }

    // ========================================================================
    // Commands
    // ========================================================================

    async fn media_play(&self) -> Result<()> {
        Err(EntityError::NotSupported("media_play"))
    }

    async fn media_pause(&self) -> Result<()> {
        Err(EntityError::NotSupported("media_pause"))
    }

    /// Toggle playback; defaults to pausing when playing and playing otherwise
    async fn media_play_pause(&self) -> Result<()> {
        if self.state() == Some(MediaPlayerState::Playing) {
            self.media_pause().await
        } else {
            self.media_play().await
        }
    }

    async fn media_stop(&self) -> Result<()> {
        Err(EntityError::NotSupported("media_stop"))
    }

    async fn media_next_track(&self) -> Result<()> {
        Err(EntityError::NotSupported("media_next_track"))
    }

    async fn media_previous_track(&self) -> Result<()> {
        Err(EntityError::NotSupported("media_previous_track"))
    }

    /// Seek to `position` seconds
    async fn media_seek(&self, _position: f64) -> Result<()> {
        Err(EntityError::NotSupported("media_seek"))
    }

    async fn turn_on(&self) -> Result<()> {
        Err(EntityError::NotSupported("turn_on"))
    }

    async fn turn_off(&self) -> Result<()> {
        Err(EntityError::NotSupported("turn_off"))
    }

    /// Raise the volume; defaults to one step through `set_volume_level`
    async fn volume_up(&self) -> Result<()> {
        let level = self.volume_level().ok_or(EntityError::NotSupported("volume_up"))?;
        self.set_volume_level((level + DEFAULT_VOLUME_STEP).min(1.0)).await
    }

    /// Lower the volume; defaults to one step through `set_volume_level`
    async fn volume_down(&self) -> Result<()> {
        let level = self.volume_level().ok_or(EntityError::NotSupported("volume_down"))?;
        self.set_volume_level((level - DEFAULT_VOLUME_STEP).max(0.0)).await
    }

    /// Set the volume, `volume` in 0.0..=1.0
    async fn set_volume_level(&self, _volume: f64) -> Result<()> {
        Err(EntityError::NotSupported("set_volume_level"))
    }

    async fn mute_volume(&self, _mute: bool) -> Result<()> {
        Err(EntityError::NotSupported("mute_volume"))
    }

    async fn select_source(&self, _source: &str) -> Result<()> {
        Err(EntityError::NotSupported("select_source"))
    }

    async fn set_shuffle(&self, _shuffle: bool) -> Result<()> {
        Err(EntityError::NotSupported("set_shuffle"))
    }

    async fn set_repeat(&self, _repeat: RepeatMode) -> Result<()> {
        Err(EntityError::NotSupported("set_repeat"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Entity that only implements play/pause/volume, to exercise the defaults
    struct MinimalPlayer {
        state: MediaPlayerState,
        volume: Option<f64>,
        calls: Mutex<Vec<String>>,
    }

    impl MinimalPlayer {
        fn new(state: MediaPlayerState, volume: Option<f64>) -> Self {
            Self {
                state,
                volume,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MediaPlayerEntity for MinimalPlayer {
        fn state(&self) -> Option<MediaPlayerState> {
            Some(self.state)
        }

        fn volume_level(&self) -> Option<f64> {
            self.volume
        }

        async fn media_play(&self) -> Result<()> {
            self.calls.lock().push("play".to_string());
            Ok(())
        }

        async fn media_pause(&self) -> Result<()> {
            self.calls.lock().push("pause".to_string());
            Ok(())
        }

        async fn set_volume_level(&self, volume: f64) -> Result<()> {
            self.calls.lock().push(format!("volume {:.2}", volume));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_play_pause_pauses_when_playing() {
        let player = MinimalPlayer::new(MediaPlayerState::Playing, None);
        player.media_play_pause().await.unwrap();
        assert_eq!(*player.calls.lock(), vec!["pause"]);
    }

    #[tokio::test]
    async fn test_default_play_pause_plays_when_paused() {
        let player = MinimalPlayer::new(MediaPlayerState::Paused, None);
        player.media_play_pause().await.unwrap();
        assert_eq!(*player.calls.lock(), vec!["play"]);
    }

    #[tokio::test]
    async fn test_default_volume_step_is_clamped() {
        let player = MinimalPlayer::new(MediaPlayerState::Idle, Some(0.95));
        player.volume_up().await.unwrap();
        player.volume_down().await.unwrap();
        assert_eq!(*player.calls.lock(), vec!["volume 1.00", "volume 0.85"]);
    }

    #[tokio::test]
    async fn test_default_volume_step_without_level() {
        let player = MinimalPlayer::new(MediaPlayerState::Idle, None);
        assert!(matches!(
            player.volume_up().await,
            Err(EntityError::NotSupported("volume_up"))
        ));
    }

    #[tokio::test]
    async fn test_unimplemented_commands_are_not_supported() {
        let player = MinimalPlayer::new(MediaPlayerState::Idle, None);
        assert!(matches!(
            player.media_seek(10.0).await,
            Err(EntityError::NotSupported("media_seek"))
        ));
        assert!(matches!(
            player.select_source("Radio").await,
            Err(EntityError::NotSupported("select_source"))
        ));
    }
}
