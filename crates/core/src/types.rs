//! Domain types for representing extracted presentation content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slide index to notes index, one entry per slide that has speaker notes.
pub type SlideNotesLinks = BTreeMap<u32, u32>;

/// Text extracted from a single slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Index parsed from the slide entry name (`slideN.xml`).
    pub index: u32,

    /// Large-font runs, space-joined in document order.
    pub title: String,

    /// All remaining runs, space-joined in document order.
    pub description: String,
}

impl Slide {
    /// Create an empty slide with the given index.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Append a run to the title.
    pub fn push_title(&mut self, text: &str) {
        push_joined(&mut self.title, text);
    }

    /// Append a run to the description.
    pub fn push_description(&mut self, text: &str) {
        push_joined(&mut self.description, text);
    }
}

/// Speaker notes for one notes page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesPage {
    /// Index parsed from the notes entry name (`notesSlideN.xml`).
    pub index: u32,

    /// All runs, space-joined in document order.
    pub text: String,
}

impl NotesPage {
    /// Create an empty notes page with the given index.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            text: String::new(),
        }
    }

    /// Append a run to the notes text.
    pub fn push_text(&mut self, text: &str) {
        push_joined(&mut self.text, text);
    }
}

/// Everything extracted from one presentation archive.
///
/// The three mappings are produced independently and only joined when a
/// report is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckContent {
    /// Slides keyed by index.
    pub slides: BTreeMap<u32, Slide>,

    /// Notes pages keyed by index.
    pub notes: BTreeMap<u32, NotesPage>,

    /// Slide-to-notes links from the slide relationship descriptors.
    pub links: SlideNotesLinks,
}

fn push_joined(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_are_space_joined_in_order() {
        let mut slide = Slide::new(3);
        slide.push_title("Quarterly");
        slide.push_description("first");
        slide.push_title("Review");
        slide.push_description("second");

        assert_eq!(slide.title, "Quarterly Review");
        assert_eq!(slide.description, "first second");
    }

    #[test]
    fn test_empty_runs_are_ignored() {
        let mut notes = NotesPage::new(1);
        notes.push_text("");
        notes.push_text("one");
        notes.push_text("");
        notes.push_text("two");
        assert_eq!(notes.text, "one two");
    }
}
