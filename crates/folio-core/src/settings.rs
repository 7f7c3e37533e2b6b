//! Client settings persisted under the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment override for the API base URL
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// Environment override for the API bearer token
pub const API_TOKEN_ENV: &str = "FOLIO_API_TOKEN";

/// Persisted settings for the folio client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the content API (e.g. https://api.example.com/v1)
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Bearer token for the content API
    #[serde(default)]
    pub api_token: Option<String>,

    /// Preferred input device name (None = system default)
    #[serde(default)]
    pub input_device: Option<String>,
}

impl Settings {
    /// Path to the settings file (`<config dir>/folio/settings.json`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    crate::verbose!("ignoring malformed settings at {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write settings to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("could not determine config directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Effective API base URL: environment override, then stored value.
    pub fn effective_api_base_url(&self) -> Option<String> {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return Some(url);
        }
        self.api_base_url.clone()
    }
}
