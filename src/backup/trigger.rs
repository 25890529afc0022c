//! Trigger entry points for backups
//!
//! The host lifecycle (vault open, vault close, manual invocation) is modeled
//! as three entry points into one backup routine, selected by
//! [`TriggerSource`]. Open and close triggers are gated on their settings
//! flags; a manual trigger always runs.

use std::thread;
use std::time::Duration;

use tracing::{error, info};

use crate::vault::VaultSource;

use super::manager::BackupManager;

/// Delay before an on-open backup runs, giving the vault time to settle
/// after startup
pub const ON_OPEN_BACKUP_DELAY: Duration = Duration::from_secs(2);

/// What caused a backup to be triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Vault-open lifecycle hook
    OnOpen,
    /// Vault-close lifecycle hook
    OnClose,
    /// Explicit user invocation
    Manual,
}

impl TriggerSource {
    /// Human-readable trigger name for log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnOpen => "on-open",
            Self::OnClose => "on-close",
            Self::Manual => "manual",
        }
    }
}

/// Run a backup for the given trigger, honoring the settings gates
///
/// Emits a one-line user-visible notice on success or failure. Any pipeline
/// error is caught here: it is logged and reported as a single generic
/// failure notice, and never propagates to the caller. Returns whether a
/// backup was attempted.
pub fn run_triggered_backup(
    source: TriggerSource,
    vault: &dyn VaultSource,
    manager: &BackupManager,
) -> bool {
    let settings = manager.settings();

    match source {
        TriggerSource::OnOpen => {
            if !settings.backup_on_open {
                info!("Skipping on-open backup: backupOnOpen is disabled");
                return false;
            }
            thread::sleep(ON_OPEN_BACKUP_DELAY);
        }
        TriggerSource::OnClose => {
            if !settings.backup_on_close {
                info!("Skipping on-close backup: backupOnClose is disabled");
                return false;
            }
        }
        TriggerSource::Manual => {}
    }

    info!("Starting {} backup of vault '{}'", source.as_str(), vault.name());

    match manager.create_backup(vault) {
        Ok(outcome) => {
            println!("Vault backup created: {}", outcome.filename());
        }
        Err(e) => {
            error!("Failed to create vault backup: {}", e);
            eprintln!("Failed to create vault backup. Check the log for details.");
        }
    }

    true
}
