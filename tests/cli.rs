//! End-to-end tests for the vaultkeep binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestEnv {
    /// Vault root with a couple of files
    vault: TempDir,
    /// Isolated config directory
    config: TempDir,
}

fn setup() -> TestEnv {
    let vault = TempDir::new().unwrap();
    std::fs::write(vault.path().join("note.md"), "# Note").unwrap();
    std::fs::create_dir(vault.path().join("img")).unwrap();
    std::fs::write(vault.path().join("img/pic.png"), [1u8, 2, 3]).unwrap();

    let config = TempDir::new().unwrap();

    TestEnv { vault, config }
}

fn vaultkeep(env: &TestEnv) -> Command {
    let mut cmd = Command::cargo_bin("vaultkeep").unwrap();
    cmd.env("VAULTKEEP_DATA_DIR", env.config.path())
        .arg("--vault")
        .arg(env.vault.path());
    cmd
}

#[test]
fn backup_create_writes_archive() {
    let env = setup();

    vaultkeep(&env)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault backup created:"));

    let backups: Vec<_> = std::fs::read_dir(env.vault.path().join("backups"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].ends_with(".zip"));
    assert!(backups[0].contains("_backup_"));
}

#[test]
fn backup_list_empty() {
    let env = setup();

    vaultkeep(&env)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found"));
}

#[test]
fn backup_list_after_create() {
    let env = setup();

    vaultkeep(&env).args(["backup", "create"]).assert().success();

    vaultkeep(&env)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn hook_on_open_disabled_by_default() {
    let env = setup();

    vaultkeep(&env)
        .args(["hook", "on-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault backup created").not());

    assert!(!env.vault.path().join("backups").exists());
}

#[test]
fn hook_on_close_enabled_by_default() {
    let env = setup();

    vaultkeep(&env)
        .args(["hook", "on-close"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault backup created:"));
}

#[test]
fn config_show_defaults() {
    let env = setup();

    vaultkeep(&env)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max-backups:         10"))
        .stdout(predicate::str::contains("include-attachments: true"));
}

#[test]
fn config_set_persists() {
    let env = setup();

    vaultkeep(&env)
        .args(["config", "set", "max-backups", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated max-backups = 5"));

    vaultkeep(&env)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max-backups:         5"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let env = setup();

    vaultkeep(&env)
        .args(["config", "set", "frequency", "daily"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting key"));
}

#[test]
fn prune_respects_force_flag() {
    let env = setup();

    vaultkeep(&env)
        .args(["config", "set", "max-backups", "1"])
        .assert()
        .success();

    // Two backups with distinct mtimes
    vaultkeep(&env).args(["backup", "create"]).assert().success();
    std::thread::sleep(std::time::Duration::from_millis(50));
    // Retention already keeps only one per run, so drop the limit check by
    // writing a second archive directly
    std::fs::write(
        env.vault.path().join("backups").join("older_backup_x.zip"),
        "stub",
    )
    .unwrap();

    vaultkeep(&env)
        .args(["backup", "prune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To be deleted:    1"));

    vaultkeep(&env)
        .args(["backup", "prune", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 backup(s)."));
}
