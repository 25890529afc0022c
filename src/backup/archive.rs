//! Zip archive construction
//!
//! Builds the whole archive in memory and hands back the finished bytes, so
//! nothing touches the backup directory until every entry has been added.
//! A failed backup therefore never leaves a partial archive on disk.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::VaultkeepResult;

/// Incrementally builds a zip archive in memory
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entry_count: usize,
}

impl ArchiveBuilder {
    /// Create an empty archive
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entry_count: 0,
        }
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    /// Add a text entry under the given archive path
    pub fn add_text(&mut self, path: &str, content: &str) -> VaultkeepResult<()> {
        self.writer.start_file(path, Self::options())?;
        self.writer.write_all(content.as_bytes())?;
        self.entry_count += 1;
        Ok(())
    }

    /// Add a binary entry under the given archive path
    pub fn add_binary(&mut self, path: &str, content: &[u8]) -> VaultkeepResult<()> {
        self.writer.start_file(path, Self::options())?;
        self.writer.write_all(content)?;
        self.entry_count += 1;
        Ok(())
    }

    /// Number of entries added so far
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Finish the archive and return the zip bytes
    pub fn finish(self) -> VaultkeepResult<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_empty_archive() {
        let builder = ArchiveBuilder::new();
        assert_eq!(builder.entry_count(), 0);

        let bytes = builder.finish().unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_entries_round_trip() {
        let mut builder = ArchiveBuilder::new();
        builder.add_text("notes/a.md", "# Alpha").unwrap();
        builder.add_binary("img/b.png", &[1, 2, 3]).unwrap();
        assert_eq!(builder.entry_count(), 2);

        let bytes = builder.finish().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut text = String::new();
        archive
            .by_name("notes/a.md")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "# Alpha");

        let mut bytes = Vec::new();
        archive
            .by_name("img/b.png")
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
