//! Path management for vaultkeep
//!
//! Provides XDG-compliant path resolution for the settings file.
//!
//! ## Path Resolution Order
//!
//! 1. `VAULTKEEP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/vaultkeep` or `~/.config/vaultkeep`
//! 3. Windows: `%APPDATA%\vaultkeep`

use std::path::PathBuf;

use crate::error::VaultkeepError;

/// Manages all paths used by vaultkeep
#[derive(Debug, Clone)]
pub struct VaultkeepPaths {
    /// Base directory for all vaultkeep data
    base_dir: PathBuf,
}

impl VaultkeepPaths {
    /// Create a new VaultkeepPaths instance
    ///
    /// Path resolution:
    /// 1. `VAULTKEEP_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/vaultkeep` or `~/.config/vaultkeep`
    /// 3. Windows: `%APPDATA%\vaultkeep`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VaultkeepError> {
        let base_dir = if let Ok(custom) = std::env::var("VAULTKEEP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create VaultkeepPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/vaultkeep/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), VaultkeepError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultkeepError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }

    /// Check if vaultkeep has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultkeepError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("vaultkeep"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultkeepError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VaultkeepError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("vaultkeep"))
}
