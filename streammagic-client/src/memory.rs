//! In-memory StreamMagic client
//!
//! `MemoryClient` keeps a `DeviceSnapshot` behind a lock, records every
//! command it receives and applies it to the snapshot the way a receiver
//! would. Push notifications are fired explicitly with [`MemoryClient::notify`],
//! or after every command when auto-notify is enabled.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::client::{ListenerId, StateUpdateCallback, StreamMagicClient};
use crate::error::{ClientError, Result};
use crate::model::{Info, NowPlaying, PlayState, RepeatMode, ShuffleMode, Source, State};

/// Everything a receiver reports, in one serializable value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub info: Info,
    #[serde(default)]
    pub state: State,
    #[serde(default)]
    pub play_state: PlayState,
    #[serde(default)]
    pub now_playing: NowPlaying,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub position_last_updated: Option<DateTime<Utc>>,
}

impl DeviceSnapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A command issued to the receiver
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    PlayPause,
    NextTrack,
    PreviousTrack,
    Seek(i64),
    SetVolume(i32),
    VolumeUp,
    VolumeDown,
    SetMute(bool),
    SetSource(String),
    PowerOn,
    PowerOff,
    SetShuffle(ShuffleMode),
    SetRepeat(RepeatMode),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::PlayPause => "play_pause",
            Command::NextTrack => "next_track",
            Command::PreviousTrack => "previous_track",
            Command::Seek(_) => "media_seek",
            Command::SetVolume(_) => "set_volume",
            Command::VolumeUp => "volume_up",
            Command::VolumeDown => "volume_down",
            Command::SetMute(_) => "set_mute",
            Command::SetSource(_) => "set_source_by_id",
            Command::PowerOn => "power_on",
            Command::PowerOff => "power_off",
            Command::SetShuffle(_) => "set_shuffle",
            Command::SetRepeat(_) => "set_repeat",
        }
    }
}

struct Inner {
    snapshot: DeviceSnapshot,
    connected: bool,
    auto_notify: bool,
    commands: Vec<Command>,
    next_failure: Option<ClientError>,
}

/// Client backed by an in-memory snapshot
pub struct MemoryClient {
    inner: Mutex<Inner>,
    listeners: Mutex<HashMap<ListenerId, StateUpdateCallback>>,
}

impl MemoryClient {
    /// Create a connected client reporting `snapshot`
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        Self {
            inner: Mutex::new(Inner {
                snapshot,
                connected: true,
                auto_notify: false,
                commands: Vec::new(),
                next_failure: None,
            }),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Create a client from a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(DeviceSnapshot::from_json(json)?))
    }

    /// Current snapshot
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// Mutate the snapshot, as a push from the receiver would
    ///
    /// Does not notify listeners; call [`MemoryClient::notify`] afterwards.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut DeviceSnapshot),
    {
        f(&mut self.inner.lock().snapshot);
    }

    /// Invoke every registered callback once, returning how many ran
    pub fn notify(&self) -> usize {
        // Callbacks run outside the lock so they may call back into the client
        let callbacks: Vec<StateUpdateCallback> = self.listeners.lock().values().cloned().collect();
        for callback in &callbacks {
            callback();
        }
        tracing::trace!("Notified {} state listeners", callbacks.len());
        callbacks.len()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.lock().contains_key(&id)
    }

    /// Commands received so far, oldest first
    pub fn commands(&self) -> Vec<Command> {
        self.inner.lock().commands.clone()
    }

    /// Drain the recorded commands
    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.inner.lock().commands)
    }

    /// Make the next command or listener call fail with `error`
    ///
    /// The failing call is not recorded and changes nothing.
    pub fn fail_next(&self, error: ClientError) {
        self.inner.lock().next_failure = Some(error);
    }

    fn take_failure(&self) -> Result<()> {
        match self.inner.lock().next_failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.inner.lock().connected = connected;
    }

    /// Notify listeners after every successful command
    pub fn set_auto_notify(&self, enabled: bool) {
        self.inner.lock().auto_notify = enabled;
    }

    fn execute(&self, command: Command) -> Result<()> {
        let auto_notify = {
            let mut inner = self.inner.lock();
            if let Some(error) = inner.next_failure.take() {
                tracing::debug!("Failing {} on request", command.name());
                return Err(error);
            }
            if !inner.connected {
                return Err(ClientError::NotConnected);
            }
            apply(&mut inner.snapshot, &command);
            inner.commands.push(command);
            inner.auto_notify
        };

        if auto_notify {
            self.notify();
        }
        Ok(())
    }
}

/// Apply a command to a snapshot the way the receiver reacts to it
fn apply(snapshot: &mut DeviceSnapshot, command: &Command) {
    match command {
        Command::Play => snapshot.play_state.state = "play".to_string(),
        Command::Pause => snapshot.play_state.state = "pause".to_string(),
        Command::Stop => snapshot.play_state.state = "stop".to_string(),
        Command::PlayPause => {
            let next = if snapshot.play_state.state == "play" { "pause" } else { "play" };
            snapshot.play_state.state = next.to_string();
        }
        Command::NextTrack | Command::PreviousTrack => {
            snapshot.play_state.position = Some(0);
            snapshot.position_last_updated = Some(Utc::now());
        }
        Command::Seek(position) => {
            snapshot.play_state.position = Some((*position).clamp(0, u32::MAX as i64) as u32);
            snapshot.position_last_updated = Some(Utc::now());
        }
        Command::SetVolume(volume) => {
            snapshot.state.volume_percent = Some((*volume).clamp(0, 100) as u8);
        }
        Command::VolumeUp => {
            let volume = snapshot.state.volume_percent.unwrap_or(0);
            snapshot.state.volume_percent = Some(volume.saturating_add(1).min(100));
        }
        Command::VolumeDown => {
            let volume = snapshot.state.volume_percent.unwrap_or(0);
            snapshot.state.volume_percent = Some(volume.saturating_sub(1));
        }
        Command::SetMute(mute) => snapshot.state.mute = *mute,
        Command::SetSource(id) => snapshot.state.source = id.clone(),
        Command::PowerOn => snapshot.state.power = true,
        Command::PowerOff => snapshot.state.power = false,
        Command::SetShuffle(mode) => snapshot.play_state.mode_shuffle = Some(*mode),
        Command::SetRepeat(mode) => snapshot.play_state.mode_repeat = Some(*mode),
    }
}

#[async_trait]
impl StreamMagicClient for MemoryClient {
    fn info(&self) -> Info {
        self.inner.lock().snapshot.info.clone()
    }

    fn state(&self) -> State {
        self.inner.lock().snapshot.state.clone()
    }

    fn play_state(&self) -> PlayState {
        self.inner.lock().snapshot.play_state.clone()
    }

    fn now_playing(&self) -> NowPlaying {
        self.inner.lock().snapshot.now_playing.clone()
    }

    fn sources(&self) -> Vec<Source> {
        self.inner.lock().snapshot.sources.clone()
    }

    fn position_last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().snapshot.position_last_updated
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().connected
    }

    async fn play(&self) -> Result<()> {
        self.execute(Command::Play)
    }

    async fn pause(&self) -> Result<()> {
        self.execute(Command::Pause)
    }

    async fn stop(&self) -> Result<()> {
        self.execute(Command::Stop)
    }

    async fn play_pause(&self) -> Result<()> {
        self.execute(Command::PlayPause)
    }

    async fn next_track(&self) -> Result<()> {
        self.execute(Command::NextTrack)
    }

    async fn previous_track(&self) -> Result<()> {
        self.execute(Command::PreviousTrack)
    }

    async fn media_seek(&self, position: i64) -> Result<()> {
        self.execute(Command::Seek(position))
    }

    async fn set_volume(&self, volume: i32) -> Result<()> {
        self.execute(Command::SetVolume(volume))
    }

    async fn volume_up(&self) -> Result<()> {
        self.execute(Command::VolumeUp)
    }

    async fn volume_down(&self) -> Result<()> {
        self.execute(Command::VolumeDown)
    }

    async fn set_mute(&self, mute: bool) -> Result<()> {
        self.execute(Command::SetMute(mute))
    }

    async fn set_source_by_id(&self, source_id: &str) -> Result<()> {
        self.execute(Command::SetSource(source_id.to_string()))
    }

    async fn power_on(&self) -> Result<()> {
        self.execute(Command::PowerOn)
    }

    async fn power_off(&self) -> Result<()> {
        self.execute(Command::PowerOff)
    }

    async fn set_shuffle(&self, mode: ShuffleMode) -> Result<()> {
        self.execute(Command::SetShuffle(mode))
    }

    async fn set_repeat(&self, mode: RepeatMode) -> Result<()> {
        self.execute(Command::SetRepeat(mode))
    }

    async fn register_state_update_callback(
        &self,
        id: ListenerId,
        callback: StateUpdateCallback,
    ) -> Result<()> {
        self.take_failure()?;
        if self.listeners.lock().insert(id, callback).is_some() {
            tracing::debug!("Replaced state listener {}", id);
        }
        Ok(())
    }

    async fn unregister_state_update_callback(&self, id: ListenerId) -> Result<()> {
        self.take_failure()?;
        self.listeners.lock().remove(&id);
        Ok(())
    }
}
