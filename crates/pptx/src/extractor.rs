//! Whole-archive extraction: slides, notes and the links between them.

use crate::archive::PptxArchive;
use crate::content::{parse_notes, parse_slide};
use crate::naming::{NOTES, SLIDE};
use crate::relationships::resolve_slide_notes;
use doctext_core::{DeckContent, Error, Result};
use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::path::Path;

/// Default cap on the number of entries in an archive.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Default cap on the uncompressed size of a single entry (64 MiB).
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// Resource caps applied while reading an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Archives with more entries than this are rejected.
    pub max_entries: usize,
    /// Entries larger than this (uncompressed) are rejected.
    pub max_entry_bytes: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }
}

impl ExtractOptions {
    /// Set the entry-count cap.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the per-entry size cap.
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: u64) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }
}

/// Extracts slide text and speaker notes from PPTX archives.
#[derive(Debug, Clone, Default)]
pub struct PptxExtractor {
    options: ExtractOptions,
}

impl PptxExtractor {
    /// Create an extractor with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given limits.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract from the archive at `path`.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<DeckContent> {
        let archive = PptxArchive::open(path)?;
        self.extract_archive(archive)
    }

    /// Extract from a seekable reader holding the archive bytes.
    pub fn extract<R: Read + Seek>(&self, reader: R) -> Result<DeckContent> {
        self.extract_archive(PptxArchive::new(reader)?)
    }

    fn extract_archive<R: Read + Seek>(&self, archive: PptxArchive<R>) -> Result<DeckContent> {
        if archive.len() > self.options.max_entries {
            return Err(Error::LimitExceeded(format!(
                "archive has {} entries, limit is {}",
                archive.len(),
                self.options.max_entries
            )));
        }

        let mut archive = archive.with_max_entry_bytes(self.options.max_entry_bytes);
        let names = archive.entry_names();

        let links = resolve_slide_notes(&mut archive, &names)?;

        let mut slides = BTreeMap::new();
        for name in names.iter().filter(|n| SLIDE.matches(n)) {
            let content = archive.read_entry(name)?;
            let slide = parse_slide(name, &content)?;
            if slides.contains_key(&slide.index) {
                return Err(Error::DuplicateIndex {
                    kind: SLIDE.kind,
                    index: slide.index,
                    name: name.clone(),
                });
            }
            slides.insert(slide.index, slide);
        }

        let mut notes = BTreeMap::new();
        for name in names.iter().filter(|n| NOTES.matches(n)) {
            let content = archive.read_entry(name)?;
            let page = parse_notes(name, &content)?;
            if notes.contains_key(&page.index) {
                return Err(Error::DuplicateIndex {
                    kind: NOTES.kind,
                    index: page.index,
                    name: name.clone(),
                });
            }
            notes.insert(page.index, page);
        }

        log::info!(
            "Extracted {} slides and {} notes pages",
            slides.len(),
            notes.len()
        );

        Ok(DeckContent {
            slides,
            notes,
            links,
        })
    }
}
