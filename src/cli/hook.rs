//! Host lifecycle hook commands
//!
//! Entry points for a host environment (editor integration, session manager,
//! shell profile) to invoke on vault open and close. Each hook is gated on
//! its settings flag; the on-open hook waits a short fixed delay before
//! running so the vault has settled.

use clap::Subcommand;
use std::path::Path;

use crate::backup::{run_triggered_backup, TriggerSource};
use crate::config::settings::Settings;
use crate::error::VaultkeepResult;

use super::backup::open_vault_and_manager;

/// Lifecycle hook subcommands
#[derive(Subcommand)]
pub enum HookCommands {
    /// Run the vault-open hook (backs up if backup-on-open is enabled)
    OnOpen,

    /// Run the vault-close hook (backs up if backup-on-close is enabled)
    OnClose,
}

/// Handle a hook command
pub fn handle_hook_command(
    vault_path: &Path,
    settings: &Settings,
    cmd: HookCommands,
) -> VaultkeepResult<()> {
    let (vault, manager) = open_vault_and_manager(vault_path, settings)?;

    let source = match cmd {
        HookCommands::OnOpen => TriggerSource::OnOpen,
        HookCommands::OnClose => TriggerSource::OnClose,
    };

    run_triggered_backup(source, &vault, &manager);

    Ok(())
}
