//! Host-side registry of media player entities
//!
//! The registry owns the update queue every [`UpdateHandle`] feeds. Each
//! queued request makes the registry re-read the entity and publish one
//! [`MediaPlayerSnapshot`] to subscribers; requests are never merged.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc, watch, Mutex};

use crate::entity::MediaPlayerEntity;
use crate::error::{EntityError, Result};
use crate::service::{self, MediaPlayerCommand};
use crate::snapshot::MediaPlayerSnapshot;
use crate::update::{UpdateHandle, UpdateRequest};

/// Configuration for the EntityRegistry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Snapshots buffered per subscriber before slow subscribers lag
    /// Default: 256
    pub publish_buffer_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            publish_buffer_size: 256,
        }
    }
}

impl RegistryConfig {
    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.publish_buffer_size == 0 {
            return Err(EntityError::InvalidArgument(
                "Publish buffer size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Registry of the media players known to the host
pub struct EntityRegistry {
    entities: RwLock<HashMap<String, Arc<dyn MediaPlayerEntity>>>,
    latest: RwLock<HashMap<String, MediaPlayerSnapshot>>,
    update_tx: mpsc::UnboundedSender<UpdateRequest>,
    update_rx: Mutex<mpsc::UnboundedReceiver<UpdateRequest>>,
    published_tx: broadcast::Sender<MediaPlayerSnapshot>,
    shutdown_tx: watch::Sender<bool>,
}

impl EntityRegistry {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (published_tx, _) = broadcast::channel(config.publish_buffer_size);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            entities: RwLock::new(HashMap::new()),
            latest: RwLock::new(HashMap::new()),
            update_tx,
            update_rx: Mutex::new(update_rx),
            published_tx,
            shutdown_tx,
        }
    }

    /// Register an entity and publish its initial state
    ///
    /// The entity receives its [`UpdateHandle`] through `added_to_host`. If
    /// that hook fails the entity is not registered.
    pub async fn add_entity(&self, entity: Arc<dyn MediaPlayerEntity>) -> Result<()> {
        let unique_id = entity.unique_id().ok_or(EntityError::MissingUniqueId)?;

        {
            let mut entities = self.entities.write();
            if entities.contains_key(&unique_id) {
                return Err(EntityError::AlreadyRegistered(unique_id));
            }
            entities.insert(unique_id.clone(), Arc::clone(&entity));
        }

        let handle = UpdateHandle::new(unique_id.clone(), self.update_tx.clone());
        if let Err(e) = entity.added_to_host(handle).await {
            self.entities.write().remove(&unique_id);
            tracing::warn!("Failed to add media player {}: {}", unique_id, e);
            return Err(e);
        }

        self.publish(&unique_id, entity.as_ref());
        tracing::info!("Added media player {}", unique_id);
        Ok(())
    }

    /// Unregister an entity
    ///
    /// If `will_remove_from_host` fails the entity stays registered and the
    /// error is returned, so the removal can be retried.
    pub async fn remove_entity(&self, unique_id: &str) -> Result<()> {
        let entity = self
            .entity(unique_id)
            .ok_or_else(|| EntityError::NotFound(unique_id.to_string()))?;

        if let Err(e) = entity.will_remove_from_host().await {
            tracing::warn!("Failed to remove media player {}: {}", unique_id, e);
            return Err(e);
        }

        self.entities.write().remove(unique_id);
        self.latest.write().remove(unique_id);
        tracing::info!("Removed media player {}", unique_id);
        Ok(())
    }

    pub fn entity(&self, unique_id: &str) -> Option<Arc<dyn MediaPlayerEntity>> {
        self.entities.read().get(unique_id).cloned()
    }

    pub fn entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entities.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Last published snapshot of an entity
    pub fn snapshot(&self, unique_id: &str) -> Option<MediaPlayerSnapshot> {
        self.latest.read().get(unique_id).cloned()
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<MediaPlayerSnapshot> {
        self.published_tx.subscribe()
    }

    /// Handle every update request queued so far, returning how many
    /// snapshots were published
    ///
    /// Returns 0 without waiting while [`EntityRegistry::run`] owns the
    /// queue; the loop publishes those requests itself.
    pub async fn process_pending(&self) -> usize {
        let Ok(mut rx) = self.update_rx.try_lock() else {
            tracing::debug!("Update loop is running, leaving pending updates to it");
            return 0;
        };
        let mut published = 0;
        while let Ok(request) = rx.try_recv() {
            if self.publish_by_id(&request.unique_id) {
                published += 1;
            }
        }
        published
    }

    /// Handle update requests until [`EntityRegistry::shutdown`] is called
    ///
    /// The loop owns the update queue while it runs, so
    /// [`EntityRegistry::process_pending`] does nothing in the meantime.
    pub async fn run(&self) {
        let mut shutdown = self.shutdown_tx.subscribe();
        if *shutdown.borrow() {
            return;
        }

        let mut rx = self.update_rx.lock().await;
        tracing::debug!("Entity registry update loop started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                request = rx.recv() => match request {
                    Some(request) => {
                        self.publish_by_id(&request.unique_id);
                    }
                    None => break,
                },
            }
        }

        tracing::debug!("Entity registry update loop stopped");
    }

    /// Stop a running update loop
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Validate and forward a command to an entity
    ///
    /// Device errors are returned unchanged after being logged.
    pub async fn call_service(&self, unique_id: &str, command: MediaPlayerCommand) -> Result<()> {
        let entity = self
            .entity(unique_id)
            .ok_or_else(|| EntityError::NotFound(unique_id.to_string()))?;

        let name = command.name();
        let result = service::call_service(entity.as_ref(), command).await;
        if let Err(e) = &result {
            tracing::warn!("Service {} failed for {}: {}", name, unique_id, e);
        }
        result
    }

    fn publish_by_id(&self, unique_id: &str) -> bool {
        match self.entity(unique_id) {
            Some(entity) => {
                self.publish(unique_id, entity.as_ref());
                true
            }
            None => {
                tracing::trace!("Dropping update for unregistered entity {}", unique_id);
                false
            }
        }
    }

    fn publish(&self, unique_id: &str, entity: &dyn MediaPlayerEntity) {
        let snapshot = MediaPlayerSnapshot::capture(unique_id, entity);
        tracing::debug!(
            "Publishing {} state={:?} features={:?}",
            unique_id,
            snapshot.state,
            snapshot.supported_features
        );
        self.latest.write().insert(unique_id.to_string(), snapshot.clone());
        // No subscribers is fine
        let _ = self.published_tx.send(snapshot);
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
