//! Service calls targeting media player entities
//!
//! The host routes user commands through [`call_service`], which checks the
//! entity advertises the feature a command needs and that arguments are in
//! range before invoking the entity.

use serde::{Deserialize, Serialize};

use crate::entity::MediaPlayerEntity;
use crate::error::{EntityError, Result};
use crate::feature::MediaPlayerEntityFeature as F;
use crate::state::RepeatMode;

/// A user command addressed to one media player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum MediaPlayerCommand {
    MediaPlay,
    MediaPause,
    MediaPlayPause,
    MediaStop,
    MediaNextTrack,
    MediaPreviousTrack,
    MediaSeek { position: f64 },
    TurnOn,
    TurnOff,
    VolumeUp,
    VolumeDown,
    VolumeSet { volume_level: f64 },
    VolumeMute { is_volume_muted: bool },
    SelectSource { source: String },
    ShuffleSet { shuffle: bool },
    RepeatSet { repeat: RepeatMode },
}

impl MediaPlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MediaPlayerCommand::MediaPlay => "media_play",
            MediaPlayerCommand::MediaPause => "media_pause",
            MediaPlayerCommand::MediaPlayPause => "media_play_pause",
            MediaPlayerCommand::MediaStop => "media_stop",
            MediaPlayerCommand::MediaNextTrack => "media_next_track",
            MediaPlayerCommand::MediaPreviousTrack => "media_previous_track",
            MediaPlayerCommand::MediaSeek { .. } => "media_seek",
            MediaPlayerCommand::TurnOn => "turn_on",
            MediaPlayerCommand::TurnOff => "turn_off",
            MediaPlayerCommand::VolumeUp => "volume_up",
            MediaPlayerCommand::VolumeDown => "volume_down",
            MediaPlayerCommand::VolumeSet { .. } => "volume_set",
            MediaPlayerCommand::VolumeMute { .. } => "volume_mute",
            MediaPlayerCommand::SelectSource { .. } => "select_source",
            MediaPlayerCommand::ShuffleSet { .. } => "shuffle_set",
            MediaPlayerCommand::RepeatSet { .. } => "repeat_set",
        }
    }

    /// Feature sets that allow this command; any one fully supported suffices
    pub fn required_features(&self) -> &'static [F] {
        const PLAY_PAUSE: F = F::from_bits_retain(F::PLAY.bits() | F::PAUSE.bits());

        match self {
            MediaPlayerCommand::MediaPlay => &[F::PLAY],
            MediaPlayerCommand::MediaPause => &[F::PAUSE],
            MediaPlayerCommand::MediaPlayPause => &[PLAY_PAUSE],
            MediaPlayerCommand::MediaStop => &[F::STOP],
            MediaPlayerCommand::MediaNextTrack => &[F::NEXT_TRACK],
            MediaPlayerCommand::MediaPreviousTrack => &[F::PREVIOUS_TRACK],
            MediaPlayerCommand::MediaSeek { .. } => &[F::SEEK],
            MediaPlayerCommand::TurnOn => &[F::TURN_ON],
            MediaPlayerCommand::TurnOff => &[F::TURN_OFF],
            MediaPlayerCommand::VolumeUp | MediaPlayerCommand::VolumeDown => {
                &[F::VOLUME_SET, F::VOLUME_STEP]
            }
            MediaPlayerCommand::VolumeSet { .. } => &[F::VOLUME_SET],
            MediaPlayerCommand::VolumeMute { .. } => &[F::VOLUME_MUTE],
            MediaPlayerCommand::SelectSource { .. } => &[F::SELECT_SOURCE],
            MediaPlayerCommand::ShuffleSet { .. } => &[F::SHUFFLE_SET],
            MediaPlayerCommand::RepeatSet { .. } => &[F::REPEAT_SET],
        }
    }

    /// Whether an entity advertising `features` accepts this command
    pub fn is_supported_by(&self, features: F) -> bool {
        self.required_features()
            .iter()
            .any(|required| features.contains(*required))
    }

    fn validate(&self) -> Result<()> {
        match self {
            MediaPlayerCommand::VolumeSet { volume_level }
                if !(0.0..=1.0).contains(volume_level) =>
            {
                Err(EntityError::InvalidArgument(format!(
                    "volume_level {} is outside 0.0..=1.0",
                    volume_level
                )))
            }
            MediaPlayerCommand::MediaSeek { position } if !position.is_finite() || *position < 0.0 => {
                Err(EntityError::InvalidArgument(format!(
                    "seek position {} must be a non-negative number",
                    position
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Validate `command` against `entity` and invoke it
pub async fn call_service(entity: &dyn MediaPlayerEntity, command: MediaPlayerCommand) -> Result<()> {
    if !command.is_supported_by(entity.supported_features()) {
        return Err(EntityError::NotSupported(command.name()));
    }
    command.validate()?;

    tracing::debug!("Calling {} on {:?}", command.name(), entity.unique_id());

    match command {
        MediaPlayerCommand::MediaPlay => entity.media_play().await,
        MediaPlayerCommand::MediaPause => entity.media_pause().await,
        MediaPlayerCommand::MediaPlayPause => entity.media_play_pause().await,
        MediaPlayerCommand::MediaStop => entity.media_stop().await,
        MediaPlayerCommand::MediaNextTrack => entity.media_next_track().await,
        MediaPlayerCommand::MediaPreviousTrack => entity.media_previous_track().await,
        MediaPlayerCommand::MediaSeek { position } => entity.media_seek(position).await,
        MediaPlayerCommand::TurnOn => entity.turn_on().await,
        MediaPlayerCommand::TurnOff => entity.turn_off().await,
        MediaPlayerCommand::VolumeUp => entity.volume_up().await,
        MediaPlayerCommand::VolumeDown => entity.volume_down().await,
        MediaPlayerCommand::VolumeSet { volume_level } => entity.set_volume_level(volume_level).await,
        MediaPlayerCommand::VolumeMute { is_volume_muted } => entity.mute_volume(is_volume_muted).await,
        MediaPlayerCommand::SelectSource { source } => entity.select_source(&source).await,
        MediaPlayerCommand::ShuffleSet { shuffle } => entity.set_shuffle(shuffle).await,
        MediaPlayerCommand::RepeatSet { repeat } => entity.set_repeat(repeat).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_pause_needs_both_features() {
        let command = MediaPlayerCommand::MediaPlayPause;
        assert!(!command.is_supported_by(F::PLAY));
        assert!(command.is_supported_by(F::PLAY | F::PAUSE));
    }

    #[test]
    fn test_volume_step_accepts_either_feature() {
        assert!(MediaPlayerCommand::VolumeUp.is_supported_by(F::VOLUME_STEP));
        assert!(MediaPlayerCommand::VolumeDown.is_supported_by(F::VOLUME_SET));
        assert!(!MediaPlayerCommand::VolumeUp.is_supported_by(F::VOLUME_MUTE));
    }

    #[test]
    fn test_validate_volume_range() {
        assert!(MediaPlayerCommand::VolumeSet { volume_level: 1.0 }.validate().is_ok());
        assert!(matches!(
            MediaPlayerCommand::VolumeSet { volume_level: 1.5 }.validate(),
            Err(EntityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_seek_position() {
        assert!(MediaPlayerCommand::MediaSeek { position: 0.0 }.validate().is_ok());
        assert!(MediaPlayerCommand::MediaSeek { position: -1.0 }.validate().is_err());
        assert!(MediaPlayerCommand::MediaSeek { position: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_command_deserializes_from_service_call() {
        let command: MediaPlayerCommand =
            serde_json::from_str(r#"{"service": "select_source", "source": "AirPlay"}"#).unwrap();
        assert_eq!(
            command,
            MediaPlayerCommand::SelectSource {
                source: "AirPlay".to_string()
            }
        );
    }
}
