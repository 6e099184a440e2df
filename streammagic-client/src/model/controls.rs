//! Transport controls and queue modes

use serde::{Deserialize, Serialize};

/// Playback command currently accepted by the receiver
///
/// The advertised set changes with the source: live radio typically drops
/// `Seek`, and some streaming services only offer the combined `PlayPause`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportControl {
    Play,
    Pause,
    PlayPause,
    Stop,
    TrackNext,
    TrackPrevious,
    Seek,
    ToggleRepeat,
    ToggleShuffle,
    /// A control this client does not know about
    #[serde(other)]
    Unknown,
}

/// Controls advertised for the current media
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    #[serde(default)]
    pub controls: Vec<TransportControl>,
}

impl NowPlaying {
    pub fn new(controls: impl IntoIterator<Item = TransportControl>) -> Self {
        Self {
            controls: controls.into_iter().collect(),
        }
    }

    pub fn has(&self, control: TransportControl) -> bool {
        self.controls.contains(&control)
    }
}

/// Shuffle mode of the play queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    #[default]
    Off,
    All,
    /// Any mode this crate does not model
    #[serde(other)]
    Unknown,
}

/// Repeat mode of the play queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    /// Any mode this crate does not model
    #[serde(other)]
    Unknown,
}
