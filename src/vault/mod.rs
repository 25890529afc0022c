//! Vault access layer
//!
//! A vault is the user's root document collection: markdown documents plus
//! binary attachments under one folder tree. The backup pipeline only talks
//! to the [`VaultSource`] trait, so the host environment that owns the files
//! is swappable:
//!
//! - [`FsVault`]: reads a vault from a directory on disk
//! - [`MemoryVault`]: holds files in memory, for tests and embedding
//!
//! Listing and read operations are synchronous and sequential; vaults are
//! assumed small enough that parallel reads buy nothing.

mod fs;
mod memory;

pub use fs::FsVault;
pub use memory::MemoryVault;

use crate::error::VaultkeepResult;

/// Abstract source of vault contents consumed by the backup pipeline.
///
/// Paths are vault-relative and use `/` separators regardless of platform,
/// so they can be used directly as archive entry names.
pub trait VaultSource {
    /// The vault's display name (used in archive filenames)
    fn name(&self) -> &str;

    /// List all documents (markdown files) in the vault
    fn documents(&self) -> VaultkeepResult<Vec<String>>;

    /// List all attachments (non-document files) in the vault
    fn attachments(&self) -> VaultkeepResult<Vec<String>>;

    /// Read a document as text
    fn read_document(&self, path: &str) -> VaultkeepResult<String>;

    /// Read an attachment as raw bytes
    fn read_binary(&self, path: &str) -> VaultkeepResult<Vec<u8>>;
}

/// How a vault file is classified during enumeration.
///
/// Canvas files are excluded from both listings: they are not plain-text
/// documents, and the attachment filter skips them as well, mirroring the
/// behavior users already rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A markdown document, read as text
    Document,
    /// A binary attachment (images, PDFs, extensionless files, ...)
    Attachment,
    /// Excluded from backups entirely
    Excluded,
}

/// Classify a vault-relative path by its extension
pub fn classify(path: &str) -> FileKind {
    let extension = path.rsplit('/').next().and_then(|name| {
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            // Dotfiles like ".gitignore" have no extension
            None
        } else {
            Some(ext)
        }
    });

    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("md") => FileKind::Document,
        Some(ext) if ext.eq_ignore_ascii_case("canvas") => FileKind::Excluded,
        // Extensionless files count as attachments
        _ => FileKind::Attachment,
    }
}
