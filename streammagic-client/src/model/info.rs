//! Unit information

use serde::{Deserialize, Serialize};

/// Static information about a receiver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Stable unit identifier, unique per physical device
    pub unit_id: String,
    /// Friendly name configured on the device
    pub name: String,
    /// Model name (e.g., "CXN V2", "EVO 150")
    pub model: String,
    /// Firmware API version
    #[serde(default)]
    pub api_version: Option<String>,
    /// UPnP device UDN
    #[serde(default)]
    pub udn: Option<String>,
}

impl Info {
    /// Create info with the required fields only
    pub fn new(unit_id: impl Into<String>, name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            name: name.into(),
            model: model.into(),
            ..Default::default()
        }
    }
}
