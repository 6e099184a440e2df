//! Registry lifecycle, update publishing and service dispatch

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use media_player::{
    EntityError, EntityRegistry, MediaPlayerCommand, MediaPlayerEntity, MediaPlayerEntityFeature,
    MediaPlayerState, RegistryConfig, Result, UpdateHandle,
};

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("lamp exploded")]
struct LampError;

/// Player whose state the test controls directly
struct FakePlayer {
    unique_id: Option<String>,
    features: MediaPlayerEntityFeature,
    state: Mutex<MediaPlayerState>,
    handle: Mutex<Option<UpdateHandle>>,
    removed: AtomicUsize,
    fail_on_play: bool,
    fail_next_remove: Mutex<bool>,
}

impl FakePlayer {
    fn new(unique_id: &str) -> Self {
        Self {
            unique_id: Some(unique_id.to_string()),
            features: MediaPlayerEntityFeature::PLAY | MediaPlayerEntityFeature::VOLUME_SET,
            state: Mutex::new(MediaPlayerState::Idle),
            handle: Mutex::new(None),
            removed: AtomicUsize::new(0),
            fail_on_play: false,
            fail_next_remove: Mutex::new(false),
        }
    }

    fn set_state(&self, state: MediaPlayerState) {
        *self.state.lock() = state;
        if let Some(handle) = self.handle.lock().as_ref() {
            handle.schedule_update();
        }
    }
}

#[async_trait]
impl MediaPlayerEntity for FakePlayer {
    fn unique_id(&self) -> Option<String> {
        self.unique_id.clone()
    }

    fn supported_features(&self) -> MediaPlayerEntityFeature {
        self.features
    }

    fn state(&self) -> Option<MediaPlayerState> {
        Some(*self.state.lock())
    }

    async fn added_to_host(&self, updates: UpdateHandle) -> Result<()> {
        *self.handle.lock() = Some(updates);
        Ok(())
    }

    async fn will_remove_from_host(&self) -> Result<()> {
        if std::mem::take(&mut *self.fail_next_remove.lock()) {
            return Err(EntityError::device(LampError));
        }
        self.removed.fetch_add(1, Ordering::SeqCst);
        *self.handle.lock() = None;
        Ok(())
    }

    async fn media_play(&self) -> Result<()> {
        if self.fail_on_play {
            return Err(EntityError::device(LampError));
        }
        self.set_state(MediaPlayerState::Playing);
        Ok(())
    }

    async fn set_volume_level(&self, _volume: f64) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_add_publishes_initial_snapshot() {
    let registry = EntityRegistry::new();
    let mut published = registry.subscribe();

    registry.add_entity(Arc::new(FakePlayer::new("p1"))).await.unwrap();

    let snapshot = published.recv().await.unwrap();
    assert_eq!(snapshot.unique_id, "p1");
    assert_eq!(snapshot.state, Some(MediaPlayerState::Idle));
    assert_eq!(registry.snapshot("p1"), Some(snapshot));
    assert_eq!(registry.entity_ids(), vec!["p1".to_string()]);
}

#[tokio::test]
async fn test_duplicate_and_missing_ids_are_rejected() {
    let registry = EntityRegistry::new();
    registry.add_entity(Arc::new(FakePlayer::new("p1"))).await.unwrap();

    let duplicate = registry.add_entity(Arc::new(FakePlayer::new("p1"))).await;
    assert!(matches!(duplicate, Err(EntityError::AlreadyRegistered(id)) if id == "p1"));

    let mut anonymous = FakePlayer::new("ignored");
    anonymous.unique_id = None;
    let missing = registry.add_entity(Arc::new(anonymous)).await;
    assert!(matches!(missing, Err(EntityError::MissingUniqueId)));
}

#[tokio::test]
async fn test_remove_calls_hook_and_forgets_entity() {
    let registry = EntityRegistry::new();
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();

    registry.remove_entity("p1").await.unwrap();

    assert_eq!(player.removed.load(Ordering::SeqCst), 1);
    assert!(registry.entity("p1").is_none());
    assert!(registry.snapshot("p1").is_none());
    assert!(matches!(
        registry.remove_entity("p1").await,
        Err(EntityError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_remove_hook_keeps_entity() {
    let registry = EntityRegistry::new();
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();
    *player.fail_next_remove.lock() = true;

    let error = registry.remove_entity("p1").await.unwrap_err();
    assert_eq!(error.to_string(), "lamp exploded");
    assert!(registry.entity("p1").is_some());
    assert!(registry.snapshot("p1").is_some());

    player.set_state(MediaPlayerState::Playing);
    assert_eq!(registry.process_pending().await, 1);

    registry.remove_entity("p1").await.unwrap();
    assert_eq!(player.removed.load(Ordering::SeqCst), 1);
    assert!(registry.entity("p1").is_none());
}

// ============================================================================
// Update publishing
// ============================================================================

#[tokio::test]
async fn test_each_update_request_publishes_once() {
    let registry = EntityRegistry::new();
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();
    let mut published = registry.subscribe();

    player.set_state(MediaPlayerState::Playing);
    player.set_state(MediaPlayerState::Paused);

    assert_eq!(registry.process_pending().await, 2);
    assert_eq!(published.recv().await.unwrap().state, Some(MediaPlayerState::Paused));
    assert_eq!(published.recv().await.unwrap().state, Some(MediaPlayerState::Paused));
    assert_eq!(registry.process_pending().await, 0);
}

#[tokio::test]
async fn test_updates_for_removed_entity_are_dropped() {
    let registry = EntityRegistry::new();
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();

    player.set_state(MediaPlayerState::Playing);
    registry.remove_entity("p1").await.unwrap();

    assert_eq!(registry.process_pending().await, 0);
}

#[tokio::test]
async fn test_run_publishes_until_shutdown() {
    let registry = Arc::new(EntityRegistry::new());
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();
    let mut published = registry.subscribe();

    let runner = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.run().await })
    };

    player.set_state(MediaPlayerState::Buffering);
    let snapshot = tokio::time::timeout(Duration::from_secs(1), published.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.state, Some(MediaPlayerState::Buffering));

    registry.shutdown();
    tokio::time::timeout(Duration::from_secs(1), runner)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_process_pending_yields_to_running_loop() {
    let registry = Arc::new(EntityRegistry::new());
    let player = Arc::new(FakePlayer::new("p1"));
    registry.add_entity(player.clone()).await.unwrap();
    let mut published = registry.subscribe();

    let runner = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move { registry.run().await })
    };
    tokio::task::yield_now().await;

    player.set_state(MediaPlayerState::Paused);
    let drained = tokio::time::timeout(Duration::from_millis(500), registry.process_pending())
        .await
        .unwrap();
    assert_eq!(drained, 0);

    let snapshot = tokio::time::timeout(Duration::from_secs(1), published.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.state, Some(MediaPlayerState::Paused));

    registry.shutdown();
    tokio::time::timeout(Duration::from_secs(1), runner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registry.process_pending().await, 0);
}

// ============================================================================
// Service calls
// ============================================================================

#[tokio::test]
async fn test_call_service_checks_features() {
    let registry = EntityRegistry::new();
    registry.add_entity(Arc::new(FakePlayer::new("p1"))).await.unwrap();

    let result = registry
        .call_service("p1", MediaPlayerCommand::MediaSeek { position: 3.0 })
        .await;
    assert!(matches!(result, Err(EntityError::NotSupported("media_seek"))));

    registry
        .call_service("p1", MediaPlayerCommand::MediaPlay)
        .await
        .unwrap();
    assert_eq!(registry.process_pending().await, 1);
    assert_eq!(
        registry.snapshot("p1").unwrap().state,
        Some(MediaPlayerState::Playing)
    );
}

#[tokio::test]
async fn test_call_service_validates_arguments() {
    let registry = EntityRegistry::new();
    registry.add_entity(Arc::new(FakePlayer::new("p1"))).await.unwrap();

    let result = registry
        .call_service("p1", MediaPlayerCommand::VolumeSet { volume_level: -0.2 })
        .await;
    assert!(matches!(result, Err(EntityError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_device_errors_pass_through() {
    let registry = EntityRegistry::new();
    let mut player = FakePlayer::new("p1");
    player.fail_on_play = true;
    registry.add_entity(Arc::new(player)).await.unwrap();

    let error = registry
        .call_service("p1", MediaPlayerCommand::MediaPlay)
        .await
        .unwrap_err();
    assert!(error.device_error::<LampError>().is_some());
    assert_eq!(error.to_string(), "lamp exploded");
}

#[tokio::test]
async fn test_unknown_entity() {
    let registry = EntityRegistry::new();
    let result = registry.call_service("nope", MediaPlayerCommand::TurnOn).await;
    assert!(matches!(result, Err(EntityError::NotFound(_))));
}

#[test]
fn test_zero_buffer_is_rejected() {
    let config = RegistryConfig {
        publish_buffer_size: 0,
    };
    assert!(EntityRegistry::with_config(config).is_err());
}
