//! PDF text extraction.

use doctext_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Extracts the text of every page of a PDF file.
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    path: PathBuf,
}

impl PdfTextExtractor {
    /// Create an extractor for `path`, checking that the file exists and
    /// has a `.pdf` extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate(&path)?;
        Ok(Self { path })
    }

    /// The validated input path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract the text of all pages, trimmed of surrounding whitespace.
    pub fn extract_text(&self) -> Result<String> {
        log::debug!("Extracting text from {}", self.path.display());
        let text = pdf_extract::extract_text(&self.path).map_err(|e| {
            Error::PdfError(format!(
                "Failed to extract text from {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let text = text.trim().to_string();
        log::info!(
            "Extracted {} characters from {}",
            text.len(),
            self.path.display()
        );
        Ok(text)
    }
}

fn validate(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("The file {} does not exist.", path.display()),
        )));
    }

    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(Error::UnsupportedFormat(format!(
            "{} is not a PDF",
            path.display()
        )));
    }
    Ok(())
}
