//! Published entity state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::MediaPlayerEntity;
use crate::feature::MediaPlayerEntityFeature;
use crate::state::{MediaPlayerState, MediaType, RepeatMode};

/// Every property of a media player, read at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPlayerSnapshot {
    pub unique_id: String,
    pub available: bool,
    pub state: Option<MediaPlayerState>,
    pub supported_features: MediaPlayerEntityFeature,
    pub source_list: Option<Vec<String>>,
    pub source: Option<String>,
    pub media_content_type: Option<MediaType>,
    pub media_title: Option<String>,
    pub media_artist: Option<String>,
    pub media_album_name: Option<String>,
    pub media_image_url: Option<String>,
    pub media_duration: Option<u32>,
    pub media_position: Option<u32>,
    pub media_position_updated_at: Option<DateTime<Utc>>,
    pub is_volume_muted: Option<bool>,
    pub volume_level: Option<f64>,
    pub shuffle: Option<bool>,
    pub repeat: Option<RepeatMode>,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl MediaPlayerSnapshot {
    /// Read every property of `entity`
    pub fn capture(unique_id: impl Into<String>, entity: &dyn MediaPlayerEntity) -> Self {
        Self {
            unique_id: unique_id.into(),
            available: entity.available(),
            state: entity.state(),
            supported_features: entity.supported_features(),
            source_list: entity.source_list(),
            source: entity.source(),
            media_content_type: entity.media_content_type(),
            media_title: entity.media_title(),
            media_artist: entity.media_artist(),
            media_album_name: entity.media_album_name(),
            media_image_url: entity.media_image_url(),
            media_duration: entity.media_duration(),
            media_position: entity.media_position(),
            media_position_updated_at: entity.media_position_updated_at(),
            is_volume_muted: entity.is_volume_muted(),
            volume_level: entity.volume_level(),
            shuffle: entity.shuffle(),
            repeat: entity.repeat(),
            captured_at: Utc::now(),
        }
    }

    /// Whether the player reports the given feature
    pub fn supports(&self, feature: MediaPlayerEntityFeature) -> bool {
        self.supported_features.contains(feature)
    }
}
