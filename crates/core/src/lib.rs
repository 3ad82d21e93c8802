//! Core domain types, error taxonomy, and report formatting for document
//! text extraction.

pub mod error;
pub mod report;
pub mod scratch;
pub mod types;

pub use error::{Error, Result};
pub use report::{aggregate, ReportFormatter, SlideReport};
pub use scratch::{remove_dir_if_exists, ScratchDir, DEFAULT_SCRATCH_DIR};
pub use types::{DeckContent, NotesPage, Slide, SlideNotesLinks};
