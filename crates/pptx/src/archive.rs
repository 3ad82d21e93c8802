//! Read-only access to the entries of a PPTX ZIP container.

use doctext_core::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// An opened presentation archive.
///
/// The underlying reader (and file handle, for [`PptxArchive::open`]) is
/// released when the archive is dropped, including on error paths.
pub struct PptxArchive<R: Read + Seek> {
    zip: ZipArchive<R>,
    max_entry_bytes: u64,
}

impl PptxArchive<BufReader<File>> {
    /// Open the archive at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        log::debug!("Opening archive {}", path.display());
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> PptxArchive<R> {
    /// Wrap a seekable reader, verifying it is a ZIP container.
    pub fn new(reader: R) -> Result<Self> {
        let zip = ZipArchive::new(reader).map_err(|e| Error::InvalidArchive(e.to_string()))?;
        Ok(Self {
            zip,
            max_entry_bytes: u64::MAX,
        })
    }

    /// Refuse to read entries larger than `bytes` (uncompressed).
    pub fn with_max_entry_bytes(mut self, bytes: u64) -> Self {
        self.max_entry_bytes = bytes;
        self
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.zip.len() == 0
    }

    /// Names of all entries, sorted.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.zip.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Read the whole content of an entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let limit = self.max_entry_bytes;
        let file = self.zip.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::EntryNotFound(name.to_string()),
            other => Error::InvalidArchive(format!("Failed to open '{}': {}", name, other)),
        })?;

        if file.size() > limit {
            return Err(Error::LimitExceeded(format!(
                "entry '{}' is {} bytes, limit is {}",
                name,
                file.size(),
                limit
            )));
        }

        let mut content = Vec::new();
        // Declared sizes can lie; never buffer more than the limit allows.
        file.take(limit.saturating_add(1))
            .read_to_end(&mut content)
            .map_err(|e| Error::InvalidArchive(format!("Failed to read '{}': {}", name, e)))?;
        if content.len() as u64 > limit {
            return Err(Error::LimitExceeded(format!(
                "entry '{}' exceeds {} bytes",
                name, limit
            )));
        }

        log::debug!("Read {} bytes from '{}'", content.len(), name);
        Ok(content)
    }
}
