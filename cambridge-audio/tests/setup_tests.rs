//! End-to-end: config entry setup, service calls and state publishing

use std::sync::Arc;

use media_player::{EntityError, EntityRegistry, MediaPlayerCommand, MediaPlayerState, RepeatMode};
use streammagic::{ClientError, Command, MemoryClient, RepeatMode as StreamMagicRepeat};

use cambridge_audio::{async_setup_entry, async_unload_entry, ConfigEntry, EntryData, SetupError};

const CXN_V2: &str = include_str!("fixtures/cxn_v2.json");

fn entry(client: &Arc<MemoryClient>) -> ConfigEntry<MemoryClient> {
    ConfigEntry::new(
        "entry-1",
        "Living Room CXN",
        EntryData::new("192.168.20.218"),
        Arc::clone(client),
    )
}

#[tokio::test]
async fn test_setup_publishes_receiver_state() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();

    let unique_id = async_setup_entry(&registry, &entry(&client)).await.unwrap();
    assert_eq!(unique_id, "0020c2d8");

    let snapshot = registry.snapshot(&unique_id).unwrap();
    assert_eq!(snapshot.state, Some(MediaPlayerState::Playing));
    assert_eq!(snapshot.source.as_deref(), Some("AirPlay"));
    assert_eq!(snapshot.media_title.as_deref(), Some("Careless Whisper"));
    assert_eq!(snapshot.volume_level, Some(0.42));
    assert_eq!(snapshot.repeat, Some(RepeatMode::All));
    assert_eq!(snapshot.shuffle, Some(false));
    assert_eq!(client.listener_count(), 1);
}

#[tokio::test]
async fn test_vendor_push_republishes() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let unique_id = async_setup_entry(&registry, &entry(&client)).await.unwrap();
    let mut published = registry.subscribe();

    client.update(|snapshot| snapshot.play_state.state = "NETWORK".to_string());
    client.notify();

    assert_eq!(registry.process_pending().await, 1);
    let snapshot = published.recv().await.unwrap();
    assert_eq!(snapshot.unique_id, unique_id);
    assert_eq!(snapshot.state, Some(MediaPlayerState::Standby));
}

#[tokio::test]
async fn test_service_calls_reach_receiver() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let unique_id = async_setup_entry(&registry, &entry(&client)).await.unwrap();

    // The fixture only offers play/pause, so pause goes through the toggle
    registry
        .call_service(&unique_id, MediaPlayerCommand::MediaPause)
        .await
        .unwrap();
    registry
        .call_service(&unique_id, MediaPlayerCommand::SelectSource { source: "D2".to_string() })
        .await
        .unwrap();
    registry
        .call_service(&unique_id, MediaPlayerCommand::VolumeSet { volume_level: 0.35 })
        .await
        .unwrap();
    registry
        .call_service(&unique_id, MediaPlayerCommand::RepeatSet { repeat: RepeatMode::One })
        .await
        .unwrap();

    assert_eq!(
        client.commands(),
        vec![
            Command::PlayPause,
            Command::SetSource("SPDIF_COAX".to_string()),
            Command::SetVolume(35),
            Command::SetRepeat(StreamMagicRepeat::All),
        ]
    );
}

#[tokio::test]
async fn test_unadvertised_stop_is_rejected_by_host() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let unique_id = async_setup_entry(&registry, &entry(&client)).await.unwrap();

    let result = registry
        .call_service(&unique_id, MediaPlayerCommand::MediaStop)
        .await;
    assert!(matches!(result, Err(EntityError::NotSupported("media_stop"))));
    assert!(client.commands().is_empty());
}

#[tokio::test]
async fn test_receiver_errors_reach_caller() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let unique_id = async_setup_entry(&registry, &entry(&client)).await.unwrap();

    client.fail_next(ClientError::Timeout);
    let error = registry
        .call_service(&unique_id, MediaPlayerCommand::TurnOff)
        .await
        .unwrap_err();
    assert!(matches!(error.device_error::<ClientError>(), Some(ClientError::Timeout)));
}

#[tokio::test]
async fn test_unload_unsubscribes() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let entry = entry(&client);
    let unique_id = async_setup_entry(&registry, &entry).await.unwrap();

    async_unload_entry(&registry, &entry).await.unwrap();

    assert_eq!(client.listener_count(), 0);
    assert!(registry.entity(&unique_id).is_none());
    assert_eq!(client.notify(), 0);
    assert_eq!(registry.process_pending().await, 0);
}

#[tokio::test]
async fn test_failed_unload_keeps_single_listener() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let entry = entry(&client);
    let unique_id = async_setup_entry(&registry, &entry).await.unwrap();

    client.fail_next(ClientError::Timeout);
    let result = async_unload_entry(&registry, &entry).await;
    assert!(matches!(result, Err(SetupError::Entity(EntityError::Device(_)))));
    assert!(registry.entity(&unique_id).is_some());
    assert_eq!(client.listener_count(), 1);

    let again = async_setup_entry(&registry, &entry).await;
    assert!(matches!(
        again,
        Err(SetupError::Entity(EntityError::AlreadyRegistered(_)))
    ));
    assert_eq!(client.listener_count(), 1);

    assert_eq!(client.notify(), 1);
    assert_eq!(registry.process_pending().await, 1);

    async_unload_entry(&registry, &entry).await.unwrap();
    assert_eq!(client.listener_count(), 0);
    assert!(registry.entity(&unique_id).is_none());
}

#[tokio::test]
async fn test_setup_twice_is_rejected() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    async_setup_entry(&registry, &entry(&client)).await.unwrap();

    let result = async_setup_entry(&registry, &entry(&client)).await;
    assert!(matches!(
        result,
        Err(SetupError::Entity(EntityError::AlreadyRegistered(_)))
    ));
    assert_eq!(client.listener_count(), 1);
}

#[tokio::test]
async fn test_invalid_host_is_rejected() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();
    let entry = ConfigEntry::new("entry-1", "CXN", EntryData::new("http://cxn"), client);

    let result = async_setup_entry(&registry, &entry).await;
    assert!(matches!(result, Err(SetupError::Config(_))));
    assert!(registry.entity_ids().is_empty());
}

#[test]
fn test_setup_from_blocking_context() {
    let client = Arc::new(MemoryClient::from_json(CXN_V2).unwrap());
    let registry = EntityRegistry::new();

    let unique_id = tokio_test::block_on(async_setup_entry(&registry, &entry(&client))).unwrap();
    assert_eq!(registry.entity_ids(), vec![unique_id]);
}
