//! Error types for document text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document text extraction.
///
/// Every variant is terminal for the document being processed: extraction
/// aborts and no partial report is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The input is not a valid compressed container.
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// A referenced entry is missing from the archive.
    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    /// An entry or relationship target does not carry the expected index.
    #[error("Malformed name '{name}': {reason}")]
    MalformedName { name: String, reason: String },

    /// Entry content is not well-formed XML.
    #[error("Malformed markup in '{entry}': {reason}")]
    MalformedMarkup { entry: String, reason: String },

    /// Two entries resolved to the same slide or notes index.
    #[error("Duplicate {kind} index {index} (from '{name}')")]
    DuplicateIndex {
        kind: &'static str,
        index: u32,
        name: String,
    },

    /// The archive exceeds a configured entry-count or entry-size cap.
    #[error("Archive limit exceeded: {0}")]
    LimitExceeded(String),

    /// The PDF backend failed to extract text.
    #[error("PDF extraction error: {0}")]
    PdfError(String),
}

impl Error {
    /// Build a [`Error::MalformedName`].
    pub fn malformed_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`Error::MalformedMarkup`].
    pub fn malformed_markup(entry: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedMarkup {
            entry: entry.into(),
            reason: reason.to_string(),
        }
    }
}
