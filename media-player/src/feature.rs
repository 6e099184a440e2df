//! Media player capability bitset
//!
//! Bit values match the host platform's `MediaPlayerEntityFeature` so that
//! published snapshots can be consumed by existing frontends unchanged.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Set of features a media player supports
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaPlayerEntityFeature(u32);

impl MediaPlayerEntityFeature {
    pub const PAUSE: Self = Self(1);
    pub const SEEK: Self = Self(2);
    pub const VOLUME_SET: Self = Self(4);
    pub const VOLUME_MUTE: Self = Self(8);
    pub const PREVIOUS_TRACK: Self = Self(16);
    pub const NEXT_TRACK: Self = Self(32);
    pub const TURN_ON: Self = Self(128);
    pub const TURN_OFF: Self = Self(256);
    pub const PLAY_MEDIA: Self = Self(512);
    pub const VOLUME_STEP: Self = Self(1024);
    pub const SELECT_SOURCE: Self = Self(2048);
    pub const STOP: Self = Self(4096);
    pub const CLEAR_PLAYLIST: Self = Self(8192);
    pub const PLAY: Self = Self(16384);
    pub const SHUFFLE_SET: Self = Self(32768);
    pub const SELECT_SOUND_MODE: Self = Self(65536);
    pub const BROWSE_MEDIA: Self = Self(131072);
    pub const REPEAT_SET: Self = Self(262144);
    pub const GROUPING: Self = Self(524288);

    const NAMED: [(&'static str, Self); 19] = [
        ("PAUSE", Self::PAUSE),
        ("SEEK", Self::SEEK),
        ("VOLUME_SET", Self::VOLUME_SET),
        ("VOLUME_MUTE", Self::VOLUME_MUTE),
        ("PREVIOUS_TRACK", Self::PREVIOUS_TRACK),
        ("NEXT_TRACK", Self::NEXT_TRACK),
        ("TURN_ON", Self::TURN_ON),
        ("TURN_OFF", Self::TURN_OFF),
        ("PLAY_MEDIA", Self::PLAY_MEDIA),
        ("VOLUME_STEP", Self::VOLUME_STEP),
        ("SELECT_SOURCE", Self::SELECT_SOURCE),
        ("STOP", Self::STOP),
        ("CLEAR_PLAYLIST", Self::CLEAR_PLAYLIST),
        ("PLAY", Self::PLAY),
        ("SHUFFLE_SET", Self::SHUFFLE_SET),
        ("SELECT_SOUND_MODE", Self::SELECT_SOUND_MODE),
        ("BROWSE_MEDIA", Self::BROWSE_MEDIA),
        ("REPEAT_SET", Self::REPEAT_SET),
        ("GROUPING", Self::GROUPING),
    ];

    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from raw bits as-is, usable in constants
    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Build a set from raw bits, dropping bits that name no feature
    pub fn from_bits_truncate(bits: u32) -> Self {
        let known = Self::NAMED.iter().fold(0, |acc, (_, feature)| acc | feature.0);
        Self(bits & known)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every feature in `other` is also in `self`
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one feature
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Names of the features in this set, in bit order
    pub fn iter_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::NAMED
            .iter()
            .filter(move |(_, feature)| self.contains(*feature))
            .map(|(name, _)| *name)
    }
}

impl BitOr for MediaPlayerEntityFeature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MediaPlayerEntityFeature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MediaPlayerEntityFeature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for MediaPlayerEntityFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "MediaPlayerEntityFeature(empty)");
        }
        let names: Vec<&str> = self.iter_names().collect();
        write!(f, "MediaPlayerEntityFeature({})", names.join(" | "))
    }
}
