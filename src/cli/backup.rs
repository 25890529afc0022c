//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::Path;

use crate::backup::{
    resolve_backup_dir, run_triggered_backup, BackupManager, TriggerSource,
};
use crate::config::settings::Settings;
use crate::error::VaultkeepResult;
use crate::vault::{FsVault, VaultSource};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup of the vault
    Create,

    /// List all backup archives
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete old backups according to the retention policy
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    vault_path: &Path,
    settings: &Settings,
    cmd: BackupCommands,
) -> VaultkeepResult<()> {
    let (vault, manager) = open_vault_and_manager(vault_path, settings)?;

    match cmd {
        BackupCommands::Create => {
            println!("Creating backup of vault '{}'...", vault.name());
            run_triggered_backup(TriggerSource::Manual, &vault, &manager);
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found in {}", manager.backup_dir().display());
                println!("Create one with: vaultkeep backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.modified);
                let age_str = format_duration(age);

                if verbose {
                    println!(
                        "{}. {}\n   Modified: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.modified.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let max_backups = settings.max_backups;

            if max_backups == 0 {
                println!("Retention is unlimited (maxBackups = 0); nothing to prune.");
                println!("You have {} backup(s).", backups.len());
                return Ok(());
            }

            let to_delete = backups.len().saturating_sub(max_backups as usize);

            if to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Retention policy keeps {} backup(s); you have {}.",
                    max_backups,
                    backups.len()
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!("Retention policy: keep {} most recent", max_backups);
            println!("Current backups:  {}", backups.len());
            println!("To be deleted:    {}", to_delete);
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  vaultkeep backup prune --force");
                return Ok(());
            }

            let deleted = manager.cleanup_old_backups()?;
            println!("Deleted {} backup(s).", deleted);
        }
    }

    Ok(())
}

/// Open the vault at the given path and build a manager for it
///
/// The resolved backup directory is excluded from vault enumeration so
/// archives are never backed up into newer archives.
pub fn open_vault_and_manager(
    vault_path: &Path,
    settings: &Settings,
) -> VaultkeepResult<(FsVault, BackupManager)> {
    let mut vault = FsVault::open(vault_path)?;
    let backup_dir = resolve_backup_dir(settings, vault.root());
    vault.exclude_dir(&backup_dir);

    let manager = BackupManager::new(backup_dir, settings.clone());
    Ok((vault, manager))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    let months = days / 30;
    format!("{}mo", months)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(5)), "5m");
        assert_eq!(format_duration(chrono::Duration::hours(3)), "3h");
        assert_eq!(format_duration(chrono::Duration::days(2)), "2d");
        assert_eq!(format_duration(chrono::Duration::days(90)), "3mo");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_open_vault_excludes_backup_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("note.md"), "# hi").unwrap();
        let backups = temp.path().join("backups");
        std::fs::create_dir(&backups).unwrap();
        std::fs::write(backups.join("old.zip"), "zip").unwrap();

        let (vault, manager) = open_vault_and_manager(temp.path(), &Settings::default()).unwrap();

        assert_eq!(manager.backup_dir(), &backups);
        assert!(vault.attachments().unwrap().is_empty());
        assert_eq!(vault.documents().unwrap(), vec!["note.md"]);
    }
}
