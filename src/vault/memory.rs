//! In-memory vault
//!
//! Useful for testing and embedding. All contents live in memory and are
//! lost on drop. Individual attachment reads can be made to fail, which is
//! how the skip-on-read-error path is exercised without filesystem tricks.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{VaultkeepError, VaultkeepResult};

use super::VaultSource;

/// A vault held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    name: String,
    documents: BTreeMap<String, String>,
    attachments: BTreeMap<String, Vec<u8>>,
    /// Paths whose reads fail with a simulated error
    failing: BTreeSet<String>,
}

impl MemoryVault {
    /// Create an empty vault with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a text document
    pub fn add_document(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(path.into(), content.into());
    }

    /// Add a binary attachment
    pub fn add_attachment(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.attachments.insert(path.into(), content.into());
    }

    /// Make reads of the given path fail
    pub fn fail_reads_of(&mut self, path: impl Into<String>) {
        self.failing.insert(path.into());
    }

    fn check_readable(&self, path: &str) -> VaultkeepResult<()> {
        if self.failing.contains(path) {
            Err(VaultkeepError::Vault(format!(
                "Simulated read failure: {}",
                path
            )))
        } else {
            Ok(())
        }
    }
}

impl VaultSource for MemoryVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn documents(&self) -> VaultkeepResult<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn attachments(&self) -> VaultkeepResult<Vec<String>> {
        Ok(self.attachments.keys().cloned().collect())
    }

    fn read_document(&self, path: &str) -> VaultkeepResult<String> {
        self.check_readable(path)?;
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| VaultkeepError::vault_file_not_found(path))
    }

    fn read_binary(&self, path: &str) -> VaultkeepResult<Vec<u8>> {
        self.check_readable(path)?;
        self.attachments
            .get(path)
            .cloned()
            .ok_or_else(|| VaultkeepError::vault_file_not_found(path))
    }
}
