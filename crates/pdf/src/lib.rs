//! Plain-text extraction from PDF files.
//!
//! A thin wrapper over the `pdf-extract` crate with up-front validation of
//! the input path.

pub mod extractor;

pub use extractor::PdfTextExtractor;
