//! Media player state enumerations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPlayerState {
    /// Powered off
    Off,
    /// Powered on, nothing more specific known
    On,
    /// Powered on with no active media
    Idle,
    Playing,
    Paused,
    /// Network standby
    Standby,
    /// Waiting for media to start
    Buffering,
}

impl MediaPlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaPlayerState::Off => "off",
            MediaPlayerState::On => "on",
            MediaPlayerState::Idle => "idle",
            MediaPlayerState::Playing => "playing",
            MediaPlayerState::Paused => "paused",
            MediaPlayerState::Standby => "standby",
            MediaPlayerState::Buffering => "buffering",
        }
    }
}

impl fmt::Display for MediaPlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repeat mode of a media player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Whether any repetition is requested
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RepeatMode::Off)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type of the current media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Music,
    Tvshow,
    Movie,
    Video,
    Podcast,
    Playlist,
    Channel,
}

/// Kind of device behind a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPlayerDeviceClass {
    Receiver,
    Speaker,
    Tv,
}

/// Registry information about the physical device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// (domain, id) pairs identifying the device
    pub identifiers: Vec<(String, String)>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub sw_version: Option<String>,
}
