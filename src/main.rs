use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use vaultkeep::cli::{
    handle_backup_command, handle_config_command, handle_hook_command, BackupCommands,
    ConfigCommands, HookCommands,
};
use vaultkeep::config::{paths::VaultkeepPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "vaultkeep",
    version,
    about = "Automatic vault backup tool with rolling retention",
    long_about = "vaultkeep archives a document vault (markdown notes plus \
                  attachments) into timestamped zip files and keeps only the \
                  most recent archives, pruning the rest."
)]
struct Cli {
    /// Path to the vault root directory
    #[arg(long, global = true, default_value = ".", env = "VAULTKEEP_VAULT")]
    vault: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Host lifecycle hooks (vault open/close)
    #[command(subcommand)]
    Hook(HookCommands),

    /// Settings management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Initialize paths and settings
    let paths = VaultkeepPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Backup(cmd) => {
            handle_backup_command(&cli.vault, &settings, cmd)?;
        }
        Commands::Hook(cmd) => {
            handle_hook_command(&cli.vault, &settings, cmd)?;
        }
        Commands::Config(cmd) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
    }

    Ok(())
}
