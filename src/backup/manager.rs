//! Backup manager for vaultkeep
//!
//! Handles archive creation and count-based retention pruning. Each backup
//! is a single zip file named `<vaultName>_backup_<timestamp>.zip`; retention
//! keeps the N most recently modified archives in the target directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::config::settings::Settings;
use crate::error::{VaultkeepError, VaultkeepResult};
use crate::vault::VaultSource;

use super::archive::ArchiveBuilder;

/// Fallback backup directory, resolved against the vault root when the
/// `backupDirectory` setting is empty
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Extension of backup archives
const ARCHIVE_EXTENSION: &str = "zip";

/// Resolve the backup target directory from settings
pub fn resolve_backup_dir(settings: &Settings, vault_root: &Path) -> PathBuf {
    if settings.backup_directory.is_empty() {
        vault_root.join(DEFAULT_BACKUP_DIR)
    } else {
        PathBuf::from(&settings.backup_directory)
    }
}

/// Metadata about an existing backup archive
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Archive filename
    pub filename: String,
    /// Full path to the archive
    pub path: PathBuf,
    /// Filesystem modification time
    pub modified: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Result of a completed backup run
#[derive(Debug, Clone)]
pub struct BackupOutcome {
    /// Path of the archive that was written
    pub archive_path: PathBuf,
    /// Number of documents written into the archive
    pub documents_written: usize,
    /// Number of attachments written into the archive
    pub attachments_written: usize,
    /// Attachments skipped because their read failed
    pub skipped_attachments: Vec<String>,
    /// Number of old archives deleted by retention cleanup
    pub pruned: usize,
}

impl BackupOutcome {
    /// Archive filename without the directory part
    pub fn filename(&self) -> String {
        self.archive_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.archive_path.display().to_string())
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Directory where archives are written
    backup_dir: PathBuf,
    /// Backup settings (read-only during a run)
    settings: Settings,
}

impl BackupManager {
    /// Create a new BackupManager writing to the given directory
    pub fn new(backup_dir: PathBuf, settings: Settings) -> Self {
        Self {
            backup_dir,
            settings,
        }
    }

    /// Get the backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get the settings this manager runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Create a backup of the vault
    ///
    /// Reads every document, and every attachment if enabled, into a single
    /// zip archive and writes it to the backup directory. An attachment whose
    /// read fails is logged and skipped; the backup continues without it.
    /// Retention cleanup runs afterwards, and a cleanup failure does not fail
    /// the backup.
    pub fn create_backup(&self, vault: &dyn VaultSource) -> VaultkeepResult<BackupOutcome> {
        let timestamp = archive_timestamp(Utc::now());
        let filename = format!("{}_backup_{}.{}", vault.name(), timestamp, ARCHIVE_EXTENSION);

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            VaultkeepError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let archive_path = self.backup_dir.join(&filename);
        let mut builder = ArchiveBuilder::new();

        let documents = vault.documents()?;
        for doc in &documents {
            let content = vault.read_document(doc)?;
            builder.add_text(doc, &content)?;
        }
        let documents_written = documents.len();

        let mut attachments_written = 0;
        let mut skipped_attachments = Vec::new();
        if self.settings.include_attachments {
            for attachment in vault.attachments()? {
                match vault.read_binary(&attachment) {
                    Ok(bytes) => {
                        builder.add_binary(&attachment, &bytes)?;
                        attachments_written += 1;
                    }
                    Err(e) => {
                        warn!("Failed to add attachment {}: {}", attachment, e);
                        skipped_attachments.push(attachment);
                    }
                }
            }
        }

        let zip_bytes = builder.finish()?;
        fs::write(&archive_path, zip_bytes)
            .map_err(|e| VaultkeepError::Io(format!("Failed to write backup file: {}", e)))?;

        info!("Vault backup created at: {}", archive_path.display());

        // Cleanup failures are logged but never fail the backup
        let pruned = match self.cleanup_old_backups() {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to cleanup old backups: {}", e);
                0
            }
        };

        Ok(BackupOutcome {
            archive_path,
            documents_written,
            attachments_written,
            skipped_attachments,
            pruned,
        })
    }

    /// List all backup archives in the backup directory, newest first
    pub fn list_backups(&self) -> VaultkeepResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            VaultkeepError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| VaultkeepError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path
                .extension()
                .map_or(false, |ext| ext == ARCHIVE_EXTENSION)
            {
                let metadata = fs::metadata(&path).map_err(|e| {
                    VaultkeepError::Io(format!("Failed to read backup metadata: {}", e))
                })?;
                let modified = metadata
                    .modified()
                    .map(DateTime::<Utc>::from)
                    .unwrap_or_else(|_| Utc::now());

                backups.push(BackupInfo {
                    filename: entry.file_name().to_string_lossy().to_string(),
                    path,
                    modified,
                    size_bytes: metadata.len(),
                });
            }
        }

        // Newest first; filenames embed the creation timestamp, so they break
        // ties when two archives land within the mtime resolution
        backups.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> VaultkeepResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }

    /// Delete archives beyond the configured maximum count
    ///
    /// Keeps the `max_backups` most recently modified archives; a maximum of
    /// zero means unlimited and leaves everything untouched. Returns the
    /// number of archives deleted.
    pub fn cleanup_old_backups(&self) -> VaultkeepResult<usize> {
        if self.settings.max_backups == 0 {
            return Ok(0);
        }

        let backups = self.list_backups()?;
        let mut deleted = 0;

        for backup in backups
            .into_iter()
            .skip(self.settings.max_backups as usize)
        {
            fs::remove_file(&backup.path)
                .map_err(|e| VaultkeepError::Io(format!("Failed to delete old backup: {}", e)))?;
            info!("Removed old backup: {}", backup.filename);
            deleted += 1;
        }

        Ok(deleted)
    }
}

/// Format a timestamp for use in archive filenames
///
/// ISO-8601 UTC with `:` and `.` replaced by `-`, so the result is a valid
/// filename on every platform and sorts lexicographically in time order.
fn archive_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}
