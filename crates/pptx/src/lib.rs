//! PPTX (Office Open XML) text extraction.
//!
//! Reads slide titles, slide body text and speaker notes from a .pptx
//! archive, and links each slide to its notes page through the slide
//! relationship parts.

pub mod archive;
pub mod content;
pub mod extractor;
pub mod naming;
pub mod relationships;
mod xml;

pub use archive::PptxArchive;
pub use content::{parse_notes, parse_slide, TextRun, TITLE_SIZE_THRESHOLD};
pub use extractor::{ExtractOptions, PptxExtractor};
pub use relationships::resolve_slide_notes;
