//! Settings CLI commands
//!
//! The command-line counterpart of the settings panel: shows the five backup
//! settings and updates them one key at a time, persisting after each change.

use clap::Subcommand;

use crate::config::paths::VaultkeepPaths;
use crate::config::settings::Settings;
use crate::error::{VaultkeepError, VaultkeepResult};

/// Settings subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings and paths
    Show,

    /// Update a setting
    ///
    /// Keys: backup-directory, include-attachments, max-backups,
    /// backup-on-close, backup-on-open
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &VaultkeepPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> VaultkeepResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("vaultkeep Configuration");
            println!("=======================");
            println!("Settings file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  backup-directory:    {}",
                if settings.backup_directory.is_empty() {
                    "(default: <vault>/backups)"
                } else {
                    &settings.backup_directory
                }
            );
            println!("  include-attachments: {}", settings.include_attachments);
            println!(
                "  max-backups:         {}{}",
                settings.max_backups,
                if settings.max_backups == 0 {
                    " (unlimited)"
                } else {
                    ""
                }
            );
            println!("  backup-on-close:     {}", settings.backup_on_close);
            println!("  backup-on-open:      {}", settings.backup_on_open);
        }

        ConfigCommands::Set { key, value } => {
            apply_setting(settings, &key, &value)?;
            settings.save(paths)?;
            println!("Updated {} = {}", key, value);
        }
    }

    Ok(())
}

/// Apply a single key/value update to the settings
fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> VaultkeepResult<()> {
    match key {
        "backup-directory" => {
            settings.backup_directory = value.to_string();
        }
        "include-attachments" => {
            settings.include_attachments = parse_bool(key, value)?;
        }
        "max-backups" => {
            settings.max_backups = value.parse().map_err(|_| {
                VaultkeepError::Config(format!(
                    "Invalid value for {}: expected a non-negative integer, got '{}'",
                    key, value
                ))
            })?;
        }
        "backup-on-close" => {
            settings.backup_on_close = parse_bool(key, value)?;
        }
        "backup-on-open" => {
            settings.backup_on_open = parse_bool(key, value)?;
        }
        _ => {
            return Err(VaultkeepError::Config(format!(
                "Unknown setting key: '{}' (expected one of backup-directory, \
                 include-attachments, max-backups, backup-on-close, backup-on-open)",
                key
            )));
        }
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> VaultkeepResult<bool> {
    value.parse().map_err(|_| {
        VaultkeepError::Config(format!(
            "Invalid value for {}: expected true or false, got '{}'",
            key, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_each_key() {
        let mut settings = Settings::default();

        apply_setting(&mut settings, "backup-directory", "/mnt/backups").unwrap();
        apply_setting(&mut settings, "include-attachments", "false").unwrap();
        apply_setting(&mut settings, "max-backups", "25").unwrap();
        apply_setting(&mut settings, "backup-on-close", "false").unwrap();
        apply_setting(&mut settings, "backup-on-open", "true").unwrap();

        assert_eq!(settings.backup_directory, "/mnt/backups");
        assert!(!settings.include_attachments);
        assert_eq!(settings.max_backups, 25);
        assert!(!settings.backup_on_close);
        assert!(settings.backup_on_open);
    }

    #[test]
    fn test_unknown_key() {
        let mut settings = Settings::default();
        let err = apply_setting(&mut settings, "frequency", "daily").unwrap_err();
        assert!(matches!(err, VaultkeepError::Config(_)));
    }

    #[test]
    fn test_invalid_values() {
        let mut settings = Settings::default();

        assert!(apply_setting(&mut settings, "max-backups", "-1").is_err());
        assert!(apply_setting(&mut settings, "max-backups", "many").is_err());
        assert!(apply_setting(&mut settings, "backup-on-open", "yes").is_err());
    }
}
