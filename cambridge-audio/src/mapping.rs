//! Translation tables between StreamMagic values and media player values
//!
//! Pure functions only; the device adapter calls them on every query so
//! results always follow the receiver's current state.

use media_player::{MediaPlayerEntityFeature as Feature, MediaPlayerState, RepeatMode};
use streammagic::{RepeatMode as StreamMagicRepeat, ShuffleMode, TransportControl};

/// Features every receiver supports
pub const BASE_FEATURES: Feature = Feature::from_bits_retain(
    Feature::SELECT_SOURCE.bits() | Feature::TURN_OFF.bits() | Feature::TURN_ON.bits(),
);

/// Features available while the receiver's pre-amp is active
pub const PREAMP_FEATURES: Feature = Feature::from_bits_retain(
    Feature::VOLUME_MUTE.bits() | Feature::VOLUME_SET.bits() | Feature::VOLUME_STEP.bits(),
);

/// Feature enabled by an advertised transport control
///
/// `PlayPause` is handled separately since it enables two features. `Stop`
/// is not exposed.
pub fn transport_feature(control: TransportControl) -> Option<Feature> {
    match control {
        TransportControl::Play => Some(Feature::PLAY),
        TransportControl::Pause => Some(Feature::PAUSE),
        TransportControl::TrackNext => Some(Feature::NEXT_TRACK),
        TransportControl::TrackPrevious => Some(Feature::PREVIOUS_TRACK),
        TransportControl::ToggleRepeat => Some(Feature::REPEAT_SET),
        TransportControl::ToggleShuffle => Some(Feature::SHUFFLE_SET),
        TransportControl::Seek => Some(Feature::SEEK),
        TransportControl::PlayPause | TransportControl::Stop | TransportControl::Unknown => None,
    }
}

/// Supported features for a receiver's pre-amp mode and advertised controls
pub fn supported_features(pre_amp_mode: bool, controls: &[TransportControl]) -> Feature {
    let mut features = BASE_FEATURES;
    if pre_amp_mode {
        features |= PREAMP_FEATURES;
    }
    if controls.contains(&TransportControl::PlayPause) {
        features |= Feature::PLAY | Feature::PAUSE;
    }
    for feature in controls.iter().copied().filter_map(transport_feature) {
        features |= feature;
    }
    features
}

/// Media player state for a raw play state and power flag
pub fn media_state(play_state: &str, power: bool) -> MediaPlayerState {
    if play_state == "NETWORK" {
        return MediaPlayerState::Standby;
    }
    if !power {
        return MediaPlayerState::Off;
    }
    match play_state {
        "play" => MediaPlayerState::Playing,
        "pause" => MediaPlayerState::Paused,
        "connecting" => MediaPlayerState::Buffering,
        "stop" | "ready" => MediaPlayerState::Idle,
        _ => MediaPlayerState::On,
    }
}

pub fn shuffle_to_streammagic(shuffle: bool) -> ShuffleMode {
    if shuffle {
        ShuffleMode::All
    } else {
        ShuffleMode::Off
    }
}

/// Only `All` counts as shuffling; unreported or unknown modes read as off
pub fn shuffle_from_streammagic(mode: Option<ShuffleMode>) -> bool {
    matches!(mode, Some(ShuffleMode::All))
}

/// The receiver only repeats the whole queue, so `One` becomes `All`
pub fn repeat_to_streammagic(repeat: RepeatMode) -> StreamMagicRepeat {
    if repeat.is_enabled() {
        StreamMagicRepeat::All
    } else {
        StreamMagicRepeat::Off
    }
}

pub fn repeat_from_streammagic(mode: Option<StreamMagicRepeat>) -> RepeatMode {
    match mode {
        Some(StreamMagicRepeat::All) => RepeatMode::All,
        _ => RepeatMode::Off,
    }
}

/// Receiver volume (0-100) for a level in 0.0..=1.0, truncated
pub fn volume_to_percent(level: f64) -> i32 {
    (level * 100.0) as i32
}

/// Level in 0.0..=1.0 for a receiver volume; unreported volume reads as 0
pub fn volume_from_percent(percent: Option<u8>) -> f64 {
    f64::from(percent.unwrap_or(0)) / 100.0
}

/// Seek target in whole seconds
pub fn seek_position(position: f64) -> i64 {
    position as i64
}
