//! vaultkeep - Automatic vault backup tool with rolling retention
//!
//! This library archives a user's document vault (markdown documents plus
//! binary attachments) into timestamped zip files and prunes old archives
//! beyond a configured maximum count.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `vault`: Vault access (filesystem and in-memory sources)
//! - `backup`: Archive creation, retention pruning, and trigger entry points
//! - `cli`: Command-line handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultkeep::backup::{resolve_backup_dir, BackupManager};
//! use vaultkeep::config::Settings;
//! use vaultkeep::vault::FsVault;
//!
//! let settings = Settings::default();
//! let vault = FsVault::open("/data/my-notes")?;
//! let backup_dir = resolve_backup_dir(&settings, vault.root());
//! let manager = BackupManager::new(backup_dir, settings);
//! manager.create_backup(&vault)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod vault;

pub use error::VaultkeepError;
