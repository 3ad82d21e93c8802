//! Slide-to-notes links from the per-slide relationship parts.

use crate::archive::PptxArchive;
use crate::naming::{notes_index_from_target, SLIDE_RELS};
use crate::xml::{local_name, Markup};
use doctext_core::{Result, SlideNotesLinks};
use quick_xml::events::Event;
use std::io::{Read, Seek};

/// Relationship types containing this marker point at a notes slide.
pub const NOTES_RELATIONSHIP_MARKER: &str = "notesSlide";

/// Read every slide relationship part named in `entry_names` and collect the
/// slide-to-notes links.
///
/// Slides whose relationship part has no notes relationship are absent from
/// the result.
pub fn resolve_slide_notes<R: Read + Seek>(
    archive: &mut PptxArchive<R>,
    entry_names: &[String],
) -> Result<SlideNotesLinks> {
    let mut links = SlideNotesLinks::new();

    for name in entry_names.iter().filter(|n| SLIDE_RELS.matches(n)) {
        let slide_index = SLIDE_RELS.index(name)?;
        let content = archive.read_entry(name)?;
        if let Some(notes_index) = parse_notes_link(name, &content)? {
            log::debug!("Slide {} -> notes {}", slide_index, notes_index);
            links.insert(slide_index, notes_index);
        }
    }

    log::info!("Resolved {} slide-to-notes links", links.len());
    Ok(links)
}

/// Find the notes slide referenced by one relationship part.
///
/// If the part lists several notes relationships the last one wins.
pub fn parse_notes_link(entry: &str, content: &[u8]) -> Result<Option<u32>> {
    let mut markup = Markup::new(entry, content)?;
    let mut found = None;

    while let Some(event) = markup.next()? {
        let element = match event {
            Event::Start(e) | Event::Empty(e) => e,
            _ => continue,
        };
        if local_name(element.name().as_ref()) != b"Relationship" {
            continue;
        }

        let rel_type = markup.attribute(&element, b"Type")?.unwrap_or_default();
        if !rel_type.contains(NOTES_RELATIONSHIP_MARKER) {
            continue;
        }

        let target = markup
            .attribute(&element, b"Target")?
            .ok_or_else(|| markup.error("notes relationship has no Target"))?;
        let notes_index = notes_index_from_target(&target)?;
        if let Some(previous) = found.replace(notes_index) {
            log::warn!(
                "{} lists more than one notes slide ({} and {}), using the last",
                entry,
                previous,
                notes_index
            );
        }
    }

    Ok(found)
}
