//! Data model reported by a StreamMagic receiver
//!
//! Every type here is a read-only snapshot. The client refreshes them
//! asynchronously as the receiver pushes changes; callers never mutate them.

pub mod controls;
pub mod info;
pub mod play_state;
pub mod source;
pub mod state;

pub use controls::{NowPlaying, RepeatMode, ShuffleMode, TransportControl};
pub use info::Info;
pub use play_state::{Metadata, PlayState};
pub use source::Source;
pub use state::State;
