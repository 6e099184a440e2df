//! Cambridge Audio receiver exposed as a media player
//!
//! `CambridgeAudioDevice` holds no state of its own beyond its subscription:
//! every property is read from the shared client session when the host asks
//! for it, and every command is forwarded to the session.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use media_player::{
    DeviceInfo, EntityError, MediaPlayerDeviceClass, MediaPlayerEntity, MediaPlayerEntityFeature,
    MediaPlayerState, MediaType, RepeatMode, Result, UpdateHandle,
};
use streammagic::{ListenerId, StateUpdateCallback, StreamMagicClient, TransportControl};

use crate::mapping;

/// Domain used in device identifiers
pub const DOMAIN: &str = "cambridge_audio";

/// Manufacturer reported in device info
pub const MANUFACTURER: &str = "Cambridge Audio";

/// Media player backed by a StreamMagic client session
pub struct CambridgeAudioDevice<C: StreamMagicClient + ?Sized> {
    client: Arc<C>,
    unique_id: String,
    listener: ListenerId,
    subscribed: Mutex<bool>,
}

impl<C: StreamMagicClient + ?Sized> CambridgeAudioDevice<C> {
    /// Wrap a client session shared with the host
    ///
    /// The unique id is the receiver's unit id, read once here.
    pub fn new(client: Arc<C>) -> Self {
        let unique_id = client.info().unit_id;
        Self {
            client,
            unique_id,
            listener: ListenerId::new(),
            subscribed: Mutex::new(false),
        }
    }

    /// Id this device registers its state callback under
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// Whether the state callback is currently registered
    pub async fn is_subscribed(&self) -> bool {
        *self.subscribed.lock().await
    }

    /// Whether `discrete` is missing but the combined play/pause toggle is
    /// offered, so the toggle has to stand in for it
    fn needs_toggle_for(&self, discrete: TransportControl) -> bool {
        let now_playing = self.client.now_playing();
        !now_playing.has(discrete) && now_playing.has(TransportControl::PlayPause)
    }
}

#[async_trait]
impl<C: StreamMagicClient + ?Sized + 'static> MediaPlayerEntity for CambridgeAudioDevice<C> {
    // ========================================================================
    // Identity
    // ========================================================================

    fn unique_id(&self) -> Option<String> {
        Some(self.unique_id.clone())
    }

    fn device_class(&self) -> Option<MediaPlayerDeviceClass> {
        Some(MediaPlayerDeviceClass::Receiver)
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        let info = self.client.info();
        Some(DeviceInfo {
            identifiers: vec![(DOMAIN.to_string(), info.unit_id.clone())],
            manufacturer: Some(MANUFACTURER.to_string()),
            model: Some(info.model),
            name: Some(info.name),
            serial_number: Some(info.unit_id),
            sw_version: info.api_version,
        })
    }

    fn available(&self) -> bool {
        self.client.is_connected()
    }

    // ========================================================================
    // State
    // ========================================================================

    fn supported_features(&self) -> MediaPlayerEntityFeature {
        let controls = self.client.now_playing().controls;
        mapping::supported_features(self.client.state().pre_amp_mode, &controls)
    }

    fn state(&self) -> Option<MediaPlayerState> {
        let play_state = self.client.play_state();
        Some(mapping::media_state(&play_state.state, self.client.state().power))
    }

    fn source_list(&self) -> Option<Vec<String>> {
        Some(self.client.sources().into_iter().map(|source| source.name).collect())
    }

    fn source(&self) -> Option<String> {
        let current = self.client.state().source;
        self.client
            .sources()
            .into_iter()
            .find(|source| source.id == current)
            .map(|source| source.name)
    }

    fn media_content_type(&self) -> Option<MediaType> {
        Some(MediaType::Music)
    }

    fn media_title(&self) -> Option<String> {
        self.client.play_state().metadata.title
    }

    fn media_artist(&self) -> Option<String> {
        self.client.play_state().metadata.artist
    }

    fn media_album_name(&self) -> Option<String> {
        self.client.play_state().metadata.album
    }

    fn media_image_url(&self) -> Option<String> {
        self.client.play_state().metadata.art_url
    }

    fn media_duration(&self) -> Option<u32> {
        self.client.play_state().metadata.duration
    }

    fn media_position(&self) -> Option<u32> {
        self.client.play_state().position
    }

    fn media_position_updated_at(&self) -> Option<DateTime<Utc>> {
        self.client.position_last_updated()
    }

    fn is_volume_muted(&self) -> Option<bool> {
        Some(self.client.state().mute)
    }

    fn volume_level(&self) -> Option<f64> {
        Some(mapping::volume_from_percent(self.client.state().volume_percent))
    }

    fn shuffle(&self) -> Option<bool> {
        Some(mapping::shuffle_from_streammagic(self.client.play_state().mode_shuffle))
    }

    fn repeat(&self) -> Option<RepeatMode> {
        Some(mapping::repeat_from_streammagic(self.client.play_state().mode_repeat))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    async fn added_to_host(&self, updates: UpdateHandle) -> Result<()> {
        let mut subscribed = self.subscribed.lock().await;
        if *subscribed {
            tracing::debug!("{} already subscribed to state updates", self.unique_id);
            return Ok(());
        }

        let callback: StateUpdateCallback = Arc::new(move || updates.schedule_update());
        self.client
            .register_state_update_callback(self.listener, callback)
            .await
            .map_err(EntityError::device)?;

        *subscribed = true;
        tracing::debug!("{} subscribed to state updates as {}", self.unique_id, self.listener);
        Ok(())
    }

    async fn will_remove_from_host(&self) -> Result<()> {
        let mut subscribed = self.subscribed.lock().await;
        if !*subscribed {
            return Ok(());
        }

        self.client
            .unregister_state_update_callback(self.listener)
            .await
            .map_err(EntityError::device)?;

        *subscribed = false;
        tracing::debug!("{} unsubscribed from state updates", self.unique_id);
        Ok(())
    }

    // ========================================================================
    // Commands
    // ========================================================================

    async fn media_play_pause(&self) -> Result<()> {
        self.client.play_pause().await.map_err(EntityError::device)
    }

    async fn media_pause(&self) -> Result<()> {
        let result = if self.needs_toggle_for(TransportControl::Pause) {
            self.client.play_pause().await
        } else {
            self.client.pause().await
        };
        result.map_err(EntityError::device)
    }

    async fn media_stop(&self) -> Result<()> {
        self.client.stop().await.map_err(EntityError::device)
    }

    async fn media_play(&self) -> Result<()> {
        let result = if self.needs_toggle_for(TransportControl::Play) {
            self.client.play_pause().await
        } else {
            self.client.play().await
        };
        result.map_err(EntityError::device)
    }

    async fn media_next_track(&self) -> Result<()> {
        self.client.next_track().await.map_err(EntityError::device)
    }

    async fn media_previous_track(&self) -> Result<()> {
        self.client.previous_track().await.map_err(EntityError::device)
    }

    async fn select_source(&self, source: &str) -> Result<()> {
        let Some(matched) = self
            .client
            .sources()
            .into_iter()
            .find(|candidate| candidate.name == source)
        else {
            tracing::debug!("{} has no source named {:?}", self.unique_id, source);
            return Ok(());
        };

        self.client
            .set_source_by_id(&matched.id)
            .await
            .map_err(EntityError::device)
    }

    async fn turn_on(&self) -> Result<()> {
        self.client.power_on().await.map_err(EntityError::device)
    }

    async fn turn_off(&self) -> Result<()> {
        self.client.power_off().await.map_err(EntityError::device)
    }

    async fn volume_up(&self) -> Result<()> {
        self.client.volume_up().await.map_err(EntityError::device)
    }

    async fn volume_down(&self) -> Result<()> {
        self.client.volume_down().await.map_err(EntityError::device)
    }

    async fn set_volume_level(&self, volume: f64) -> Result<()> {
        self.client
            .set_volume(mapping::volume_to_percent(volume))
            .await
            .map_err(EntityError::device)
    }

    async fn mute_volume(&self, mute: bool) -> Result<()> {
        self.client.set_mute(mute).await.map_err(EntityError::device)
    }

    async fn media_seek(&self, position: f64) -> Result<()> {
        self.client
            .media_seek(mapping::seek_position(position))
            .await
            .map_err(EntityError::device)
    }

    async fn set_shuffle(&self, shuffle: bool) -> Result<()> {
        self.client
            .set_shuffle(mapping::shuffle_to_streammagic(shuffle))
            .await
            .map_err(EntityError::device)
    }

    async fn set_repeat(&self, repeat: RepeatMode) -> Result<()> {
        self.client
            .set_repeat(mapping::repeat_to_streammagic(repeat))
            .await
            .map_err(EntityError::device)
    }
}
