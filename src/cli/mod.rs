//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup layer.

pub mod backup;
pub mod config;
pub mod hook;

pub use backup::{handle_backup_command, BackupCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use hook::{handle_hook_command, HookCommands};
