//! Zone state (power, pre-amp, mute, volume, source)

use serde::{Deserialize, Serialize};

/// Current zone state of a receiver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Device is powered on (not in standby)
    pub power: bool,
    /// Volume and mute are handled by the receiver's pre-amp
    #[serde(default)]
    pub pre_amp_mode: bool,
    #[serde(default)]
    pub mute: bool,
    /// Pre-amp volume (0-100), absent when the pre-amp is disabled
    #[serde(default)]
    pub volume_percent: Option<u8>,
    /// Id of the currently selected source
    #[serde(default)]
    pub source: String,
}
