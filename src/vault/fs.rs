//! Filesystem-backed vault
//!
//! Walks a directory tree and classifies each file as a document or an
//! attachment. Hidden entries (leading dot, e.g. editor state folders) are
//! skipped, as is the resolved backup directory when it lives inside the
//! vault, so archives never swallow older archives.

use std::path::{Path, PathBuf};

use crate::error::{VaultkeepError, VaultkeepResult};

use super::{classify, FileKind, VaultSource};

/// A vault rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsVault {
    /// Vault root directory
    root: PathBuf,
    /// Display name, taken from the root directory name
    name: String,
    /// Directories excluded from enumeration (absolute paths)
    excluded: Vec<PathBuf>,
}

impl FsVault {
    /// Open a vault at the given root directory
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> VaultkeepResult<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(VaultkeepError::Vault(format!(
                "Vault root is not a directory: {}",
                root.display()
            )));
        }

        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "vault".to_string());

        Ok(Self {
            root,
            name,
            excluded: Vec::new(),
        })
    }

    /// Exclude a directory from enumeration (e.g. the backup target when it
    /// is nested inside the vault)
    pub fn exclude_dir(&mut self, dir: impl Into<PathBuf>) {
        self.excluded.push(dir.into());
    }

    /// The vault root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate all files of the given kind, sorted by relative path
    fn list(&self, kind: FileKind) -> VaultkeepResult<Vec<String>> {
        let mut paths = Vec::new();
        self.walk(&self.root, kind, &mut paths)?;
        paths.sort();
        Ok(paths)
    }

    /// Recursively collect matching files under `dir`
    fn walk(&self, dir: &Path, kind: FileKind, out: &mut Vec<String>) -> VaultkeepResult<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            VaultkeepError::Vault(format!("Failed to read {}: {}", dir.display(), e))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| VaultkeepError::Vault(format!("Failed to read entry: {}", e)))?;
            let path = entry.path();

            // Skip hidden files and directories
            if let Some(name) = path.file_name() {
                if name.to_string_lossy().starts_with('.') {
                    continue;
                }
            }

            if self.excluded.iter().any(|ex| path == *ex) {
                continue;
            }

            if path.is_dir() {
                self.walk(&path, kind, out)?;
            } else if let Some(rel) = self.relative_path(&path) {
                if classify(&rel) == kind {
                    out.push(rel);
                }
            }
        }

        Ok(())
    }

    /// Vault-relative path with `/` separators
    fn relative_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(parts.join("/"))
    }

    /// Absolute path for a vault-relative path
    fn absolute_path(&self, rel: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in rel.split('/') {
            path.push(part);
        }
        path
    }
}

impl VaultSource for FsVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn documents(&self) -> VaultkeepResult<Vec<String>> {
        self.list(FileKind::Document)
    }

    fn attachments(&self) -> VaultkeepResult<Vec<String>> {
        self.list(FileKind::Attachment)
    }

    fn read_document(&self, path: &str) -> VaultkeepResult<String> {
        std::fs::read_to_string(self.absolute_path(path))
            .map_err(|e| VaultkeepError::Vault(format!("Failed to read {}: {}", path, e)))
    }

    fn read_binary(&self, path: &str) -> VaultkeepResult<Vec<u8>> {
        std::fs::read(self.absolute_path(path))
            .map_err(|e| VaultkeepError::Vault(format!("Failed to read {}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_vault() -> (FsVault, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        std::fs::write(root.join("note.md"), "# Note").unwrap();
        std::fs::create_dir(root.join("daily")).unwrap();
        std::fs::write(root.join("daily/today.md"), "meeting notes").unwrap();
        std::fs::create_dir(root.join("img")).unwrap();
        std::fs::write(root.join("img/photo.png"), [0x89u8, 0x50, 0x4e]).unwrap();
        std::fs::write(root.join("board.canvas"), "{}").unwrap();
        std::fs::create_dir(root.join(".state")).unwrap();
        std::fs::write(root.join(".state/app.json"), "{}").unwrap();

        let vault = FsVault::open(root.to_path_buf()).unwrap();
        (vault, temp_dir)
    }

    #[test]
    fn test_documents_listing() {
        let (vault, _temp) = create_test_vault();

        let docs = vault.documents().unwrap();
        assert_eq!(docs, vec!["daily/today.md", "note.md"]);
    }

    #[test]
    fn test_attachments_listing() {
        let (vault, _temp) = create_test_vault();

        // Canvas files and hidden directories are excluded
        let attachments = vault.attachments().unwrap();
        assert_eq!(attachments, vec!["img/photo.png"]);
    }

    #[test]
    fn test_read_contents() {
        let (vault, _temp) = create_test_vault();

        assert_eq!(vault.read_document("note.md").unwrap(), "# Note");
        assert_eq!(
            vault.read_binary("img/photo.png").unwrap(),
            vec![0x89u8, 0x50, 0x4e]
        );
    }

    #[test]
    fn test_excluded_dir() {
        let (mut vault, temp) = create_test_vault();

        let backups = temp.path().join("backups");
        std::fs::create_dir(&backups).unwrap();
        std::fs::write(backups.join("old_backup.zip"), "zip").unwrap();

        vault.exclude_dir(&backups);

        let attachments = vault.attachments().unwrap();
        assert_eq!(attachments, vec!["img/photo.png"]);
    }

    #[test]
    fn test_open_missing_root() {
        let err = FsVault::open("/nonexistent/vault/root").unwrap_err();
        assert!(matches!(err, VaultkeepError::Vault(_)));
    }

    #[test]
    fn test_vault_name_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("my-notes");
        std::fs::create_dir(&root).unwrap();

        let vault = FsVault::open(root).unwrap();
        assert_eq!(vault.name(), "my-notes");
    }
}
