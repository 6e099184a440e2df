//! Play state and now-playing metadata

use serde::{Deserialize, Serialize};

use super::controls::{RepeatMode, ShuffleMode};

/// Metadata for the media currently playing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Album art URL
    pub art_url: Option<String>,
    /// Track duration in seconds
    pub duration: Option<u32>,
}

/// Playback snapshot of the active source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayState {
    /// Raw transport state as reported by the receiver
    ///
    /// Known values are "NETWORK", "play", "pause", "connecting", "stop"
    /// and "ready". Firmware may report others, so this stays a string.
    pub state: String,
    #[serde(default)]
    pub metadata: Metadata,
    /// Position in seconds
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub mode_shuffle: Option<ShuffleMode>,
    #[serde(default)]
    pub mode_repeat: Option<RepeatMode>,
}

impl Default for PlayState {
    fn default() -> Self {
        Self {
            state: "ready".to_string(),
            metadata: Metadata::default(),
            position: None,
            mode_shuffle: None,
            mode_repeat: None,
        }
    }
}

impl PlayState {
    /// Create a play state with the given raw state and no metadata
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..Default::default()
        }
    }
}
