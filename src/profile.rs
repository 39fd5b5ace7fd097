use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Saved user defaults, stored as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_query: Option<String>,
    /// Keys this version does not know about, kept as-is on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Missing or unreadable files give an empty profile.
    pub fn load(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from));
        match parsed {
            Ok(profile) => profile,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no usable profile");
                Profile::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write profile {}", path.display()))
    }
}
