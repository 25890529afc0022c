//! User settings for vaultkeep
//!
//! Manages the five backup preferences: target directory, attachment
//! inclusion, retention count, and the open/close auto-backup flags.
//!
//! Settings are persisted as a flat JSON record with camelCase keys. Every
//! field carries a serde default, so a file written by an older version (or
//! with fields missing) loads with defaults filled in.

use serde::{Deserialize, Serialize};

use super::paths::VaultkeepPaths;
use crate::error::{VaultkeepError, VaultkeepResult};

/// User settings for vaultkeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory where backup archives are written.
    /// Empty string means "default" (a `backups` folder next to the vault).
    #[serde(default)]
    pub backup_directory: String,

    /// Whether non-document files (images, PDFs, etc.) are included
    #[serde(default = "default_include_attachments")]
    pub include_attachments: bool,

    /// Maximum number of backup archives to keep (0 = unlimited)
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,

    /// Automatically create a backup when the vault is closed
    #[serde(default = "default_backup_on_close")]
    pub backup_on_close: bool,

    /// Automatically create a backup when the vault is opened
    #[serde(default)]
    pub backup_on_open: bool,
}

fn default_include_attachments() -> bool {
    true
}

fn default_max_backups() -> u32 {
    10
}

fn default_backup_on_close() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup_directory: String::new(),
            include_attachments: default_include_attachments(),
            max_backups: default_max_backups(),
            backup_on_close: default_backup_on_close(),
            backup_on_open: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &VaultkeepPaths) -> VaultkeepResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| VaultkeepError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultkeepError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultkeepPaths) -> VaultkeepResult<()> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultkeepError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| VaultkeepError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
