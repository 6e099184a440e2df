//! Config entry setup and unload

use std::sync::Arc;

use media_player::{EntityRegistry, MediaPlayerEntity};
use streammagic::StreamMagicClient;

use crate::config::ConfigEntry;
use crate::device::CambridgeAudioDevice;
use crate::error::Result;

/// Create the media player for `entry` and add it to the registry
///
/// Returns the unique id the player was registered under.
pub async fn async_setup_entry<C>(registry: &EntityRegistry, entry: &ConfigEntry<C>) -> Result<String>
where
    C: StreamMagicClient + ?Sized + 'static,
{
    entry.data.validate()?;

    let device = CambridgeAudioDevice::new(Arc::clone(&entry.runtime_data));
    let unique_id = device.unique_id().unwrap_or_default();

    registry.add_entity(Arc::new(device)).await?;

    tracing::info!(
        "Set up {} ({}) at {} as {}",
        entry.title,
        entry.entry_id,
        entry.data.host,
        unique_id
    );
    Ok(unique_id)
}

/// Remove the media player created for `entry`
pub async fn async_unload_entry<C>(registry: &EntityRegistry, entry: &ConfigEntry<C>) -> Result<()>
where
    C: StreamMagicClient + ?Sized + 'static,
{
    let unique_id = entry.runtime_data.info().unit_id;
    registry.remove_entity(&unique_id).await?;

    tracing::info!("Unloaded {} ({})", entry.title, entry.entry_id);
    Ok(())
}
