//! Backup system for vaultkeep
//!
//! Archives a vault's documents and attachments into a single timestamped
//! zip file and prunes old archives beyond the configured maximum count.
//!
//! # Archive Format
//!
//! One zip file per backup, named `<vaultName>_backup_<timestamp>.zip` where
//! the timestamp is an ISO-8601 UTC instant with `:` and `.` replaced by `-`.
//! Entry paths inside the archive mirror the vault-relative source paths.
//!
//! # Retention
//!
//! Pruning keeps the `maxBackups` most recently modified archives in the
//! backup directory; a maximum of zero disables pruning entirely.
//!
//! # Error Handling
//!
//! Two tiers: a failed attachment read is logged and the file skipped, while
//! any other pipeline error aborts the whole backup. Cleanup errors are
//! logged and swallowed; a backup whose cleanup failed still counts as a
//! success.
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultkeep::backup::{resolve_backup_dir, BackupManager, TriggerSource};
//! use vaultkeep::config::Settings;
//! use vaultkeep::vault::FsVault;
//!
//! let settings = Settings::default();
//! let vault = FsVault::open("/data/my-notes")?;
//! let backup_dir = resolve_backup_dir(&settings, vault.root());
//!
//! let manager = BackupManager::new(backup_dir, settings);
//! let outcome = manager.create_backup(&vault)?;
//! println!("wrote {}", outcome.filename());
//! ```

mod archive;
mod manager;
mod trigger;

pub use archive::ArchiveBuilder;
pub use manager::{
    resolve_backup_dir, BackupInfo, BackupManager, BackupOutcome, DEFAULT_BACKUP_DIR,
};
pub use trigger::{run_triggered_backup, TriggerSource, ON_OPEN_BACKUP_DELAY};
