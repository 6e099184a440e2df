//! Input sources

use serde::{Deserialize, Serialize};

/// An input source advertised by the receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Vendor source id (e.g., "AIRPLAY", "SPDIF_COAX")
    pub id: String,
    /// Display name
    pub name: String,
}

impl Source {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
