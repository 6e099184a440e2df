//! Drive a simulated Cambridge Audio receiver through the media player host
//!
//! Run with:
//!
//! ```text
//! CAMBRIDGE_AUDIO_LOG_MODE=development cargo run -p cambridge-audio --example simulated_receiver
//! ```

use std::sync::Arc;
use std::time::Duration;

use cambridge_audio::{async_setup_entry, async_unload_entry, init_logging, ConfigEntry, EntryData, IntegrationConfig};
use media_player::{EntityRegistry, MediaPlayerCommand, MediaPlayerSnapshot};
use streammagic::{DeviceSnapshot, Info, MemoryClient, NowPlaying, PlayState, Source, State, TransportControl};

fn receiver() -> DeviceSnapshot {
    DeviceSnapshot {
        info: Info::new("0020c2d8", "Living Room CXN", "CXN V2"),
        state: State {
            power: true,
            pre_amp_mode: true,
            mute: false,
            volume_percent: Some(30),
            source: "IR".to_string(),
        },
        play_state: PlayState::with_state("ready"),
        now_playing: NowPlaying::new([
            TransportControl::PlayPause,
            TransportControl::TrackNext,
            TransportControl::TrackPrevious,
        ]),
        sources: vec![
            Source::new("IR", "Internet Radio"),
            Source::new("AIRPLAY", "AirPlay"),
            Source::new("SPDIF_COAX", "D2"),
        ],
        position_last_updated: None,
    }
}

fn print_snapshot(snapshot: &MediaPlayerSnapshot) {
    println!(
        "{} state={} source={} volume={:.2} features={:?}",
        snapshot.unique_id,
        snapshot.state.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string()),
        snapshot.source.as_deref().unwrap_or("-"),
        snapshot.volume_level.unwrap_or_default(),
        snapshot.supported_features,
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = IntegrationConfig::from_env();
    config.validate()?;
    init_logging(config.logging)?;

    let client = Arc::new(MemoryClient::new(receiver()));
    // Echo every command back as a state push, like a real receiver
    client.set_auto_notify(true);

    let registry = Arc::new(EntityRegistry::with_config(config.registry.clone())?);
    let mut published = registry.subscribe();
    let runner = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.run().await })
    };

    let entry = ConfigEntry::new(
        "entry-1",
        "Living Room CXN",
        EntryData::new("192.168.20.218"),
        Arc::clone(&client),
    );
    let unique_id = async_setup_entry(&registry, &entry).await?;

    let commands = [
        MediaPlayerCommand::MediaPlay,
        MediaPlayerCommand::SelectSource { source: "AirPlay".to_string() },
        MediaPlayerCommand::VolumeSet { volume_level: 0.45 },
        MediaPlayerCommand::MediaPause,
        MediaPlayerCommand::TurnOff,
    ];

    for command in commands {
        println!("> {}", command.name());
        if let Err(e) = registry.call_service(&unique_id, command).await {
            println!("  failed: {}", e);
        }
    }

    // Initial snapshot plus one per command
    for _ in 0..6 {
        match tokio::time::timeout(Duration::from_millis(500), published.recv()).await {
            Ok(Ok(snapshot)) => print_snapshot(&snapshot),
            _ => break,
        }
    }

    async_unload_entry(&registry, &entry).await?;
    registry.shutdown();
    runner.await?;

    println!("Commands seen by receiver: {:?}", client.commands());
    Ok(())
}
