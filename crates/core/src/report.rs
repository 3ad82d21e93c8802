//! Slide report output.
//!
//! Joins slides with their linked speaker notes and renders one block per
//! slide, in ascending slide index order.

use crate::types::{NotesPage, Slide, SlideNotesLinks};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// One slide of the report, borrowed from the extracted mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideReport<'a> {
    /// Slide index.
    pub index: u32,
    /// Slide title text.
    pub title: &'a str,
    /// Slide body text.
    pub description: &'a str,
    /// Linked notes text, present only when the link and its target exist.
    pub notes: Option<&'a str>,
}

/// Join slides with their notes, in ascending slide index order.
///
/// A slide without a link, or whose link points at a notes index that has
/// no notes page, is reported without notes.
pub fn aggregate<'a>(
    slides: &'a BTreeMap<u32, Slide>,
    notes: &'a BTreeMap<u32, NotesPage>,
    links: &SlideNotesLinks,
) -> Vec<SlideReport<'a>> {
    slides
        .iter()
        .map(|(&index, slide)| {
            let linked = links.get(&index).and_then(|target| {
                let page = notes.get(target);
                if page.is_none() {
                    log::warn!(
                        "Slide {} links to notes page {} which is not in the archive",
                        index,
                        target
                    );
                }
                page
            });

            SlideReport {
                index,
                title: &slide.title,
                description: &slide.description,
                notes: linked.map(|n| n.text.as_str()),
            }
        })
        .collect()
}

/// Formatter for the human-readable slide report.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    /// Emit the `Notes:` line for slides that have notes.
    include_notes: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self {
            include_notes: true,
        }
    }
}

impl ReportFormatter {
    /// Create a new formatter that includes speaker notes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `Notes:` line.
    pub fn with_notes(mut self, include_notes: bool) -> Self {
        self.include_notes = include_notes;
        self
    }

    /// Render the report as a string.
    ///
    /// # Example output
    /// ```text
    /// Slides Content:
    /// Slide number: 1
    ///   Title: Intro
    ///   Description: Welcome to the deck
    ///   Notes: Remember to smile
    ///
    /// ```
    pub fn format(&self, report: &[SlideReport<'_>]) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out, report);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Write the report to any output stream.
    pub fn write_to<W: Write>(&self, out: &mut W, report: &[SlideReport<'_>]) -> io::Result<()> {
        writeln!(out, "Slides Content:")?;
        for slide in report {
            writeln!(out, "Slide number: {}", slide.index)?;
            writeln!(out, "  Title: {}", slide.title)?;
            writeln!(out, "  Description: {}", slide.description)?;
            if self.include_notes {
                if let Some(notes) = slide.notes {
                    writeln!(out, "  Notes: {}", notes)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(index: u32, title: &str, description: &str) -> Slide {
        Slide {
            index,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn notes_page(index: u32, text: &str) -> NotesPage {
        NotesPage {
            index,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_aggregate_orders_by_index() {
        let mut slides = BTreeMap::new();
        slides.insert(10, slide(10, "Ten", ""));
        slides.insert(2, slide(2, "Two", ""));
        slides.insert(1, slide(1, "One", ""));

        let notes = BTreeMap::new();
        let report = aggregate(&slides, &notes, &SlideNotesLinks::new());
        let order: Vec<u32> = report.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 10]);
    }

    #[test]
    fn test_aggregate_omits_missing_notes() {
        let mut slides = BTreeMap::new();
        slides.insert(1, slide(1, "Linked", ""));
        slides.insert(2, slide(2, "Dangling", ""));
        slides.insert(3, slide(3, "Unlinked", ""));

        let mut notes = BTreeMap::new();
        notes.insert(1, notes_page(1, "Speak slowly"));

        let mut links = SlideNotesLinks::new();
        links.insert(1, 1);
        links.insert(2, 7);

        let report = aggregate(&slides, &notes, &links);
        assert_eq!(report[0].notes, Some("Speak slowly"));
        assert_eq!(report[1].notes, None);
        assert_eq!(report[2].notes, None);

        // Inputs are untouched.
        assert_eq!(links.len(), 2);
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_format_report() {
        let mut slides = BTreeMap::new();
        slides.insert(1, slide(1, "Intro", "Welcome to the deck"));
        slides.insert(2, slide(2, "", "Agenda"));
        let mut notes = BTreeMap::new();
        notes.insert(1, notes_page(1, "Remember to smile"));
        let mut links = SlideNotesLinks::new();
        links.insert(1, 1);

        let report = aggregate(&slides, &notes, &links);
        let expected = "Slides Content:\n\
                        Slide number: 1\n  Title: Intro\n  Description: Welcome to the deck\n  Notes: Remember to smile\n\n\
                        Slide number: 2\n  Title: \n  Description: Agenda\n\n";
        assert_eq!(ReportFormatter::new().format(&report), expected);
    }

    #[test]
    fn test_format_without_notes() {
        let mut slides = BTreeMap::new();
        slides.insert(1, slide(1, "Intro", "Body"));
        let mut notes = BTreeMap::new();
        notes.insert(1, notes_page(1, "hidden"));
        let mut links = SlideNotesLinks::new();
        links.insert(1, 1);

        let report = aggregate(&slides, &notes, &links);
        let text = ReportFormatter::new().with_notes(false).format(&report);
        assert!(!text.contains("Notes:"));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(ReportFormatter::new().format(&[]), "Slides Content:\n");
    }
}
