//! Configuration module for vaultkeep
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::VaultkeepPaths;
pub use settings::Settings;
