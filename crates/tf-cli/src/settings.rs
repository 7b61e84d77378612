//! Persisted CLI settings.
//!
//! Stored as TOML in the user's config directory. A missing or unreadable
//! file yields the defaults; command-line flags override individual values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tf_lookup::{DEFAULT_LIMIT, DEFAULT_THRESHOLD};
use tf_model::DEFAULT_TABLE_PREFIX;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub links: LinkSettings,
    pub lookup: LookupSettings,
    pub events: EventSettings,
}

impl Settings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let settings = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        debug!(path = %path.display(), "loaded settings");
        settings
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("write settings {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "TableFinder", "tablefinder")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding `events/{id}/...` objects.
    pub root: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./events-store"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Address guests open; event and token are appended as query parameters.
    pub base_url: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8501".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub threshold: f64,
    pub limit: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    pub default_table_prefix: String,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            default_table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }
}
