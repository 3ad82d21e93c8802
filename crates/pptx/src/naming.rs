//! Entry-name conventions of the presentation package.
//!
//! Slide, notes and relationship parts carry their index in the file name
//! (`slide3.xml`, `notesSlide3.xml`, `slide3.xml.rels`). Indices are derived
//! by stripping a fixed prefix and suffix; whatever remains must be a
//! non-empty run of ASCII digits.

use doctext_core::{Error, Result};

/// Directory holding slide parts; relationship targets resolve against it.
pub const SLIDES_DIR: &str = "ppt/slides";

/// Directory holding notes slide parts.
pub const NOTES_DIR: &str = "ppt/notesSlides";

/// A family of indexed entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPattern {
    /// Human-readable kind, used in error messages.
    pub kind: &'static str,
    /// Everything before the index.
    pub prefix: &'static str,
    /// Everything after the index.
    pub suffix: &'static str,
}

/// `ppt/slides/slideN.xml`
pub const SLIDE: EntryPattern = EntryPattern {
    kind: "slide",
    prefix: "ppt/slides/slide",
    suffix: ".xml",
};

/// `ppt/notesSlides/notesSlideN.xml`
pub const NOTES: EntryPattern = EntryPattern {
    kind: "notes",
    prefix: "ppt/notesSlides/notesSlide",
    suffix: ".xml",
};

/// `ppt/slides/_rels/slideN.xml.rels`
pub const SLIDE_RELS: EntryPattern = EntryPattern {
    kind: "slide relationships",
    prefix: "ppt/slides/_rels/slide",
    suffix: ".xml.rels",
};

impl EntryPattern {
    /// Whether the entry belongs to this family.
    ///
    /// A match only says the name has the right shape; [`EntryPattern::index`]
    /// may still reject it, including when the index is missing altogether.
    pub fn matches(&self, name: &str) -> bool {
        name.len() >= self.prefix.len() + self.suffix.len()
            && name.starts_with(self.prefix)
            && name.ends_with(self.suffix)
    }

    /// Parse the index embedded in the entry name.
    pub fn index(&self, name: &str) -> Result<u32> {
        parse_index(name, self.prefix, self.suffix)
    }
}

/// Strip `prefix` and `suffix` from `name` and parse what remains as an index.
pub fn parse_index(name: &str, prefix: &str, suffix: &str) -> Result<u32> {
    let digits = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .ok_or_else(|| {
            Error::malformed_name(name, format!("expected '{}<N>{}'", prefix, suffix))
        })?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed_name(
            name,
            format!("index '{}' is not numeric", digits),
        ));
    }

    digits
        .parse()
        .map_err(|_| Error::malformed_name(name, format!("index '{}' is out of range", digits)))
}

/// Resolve a slide relationship target to a notes index.
///
/// Accepts a bare `notesSlideN.xml` or any relative or absolute path that
/// resolves to `ppt/notesSlides/notesSlideN.xml`.
pub fn notes_index_from_target(target: &str) -> Result<u32> {
    let resolved = if target.contains('/') {
        resolve_part_path(SLIDES_DIR, target)?
    } else {
        format!("{}/{}", NOTES_DIR, target)
    };

    if !NOTES.matches(&resolved) {
        return Err(Error::malformed_name(
            target,
            format!("relationship target does not point into {}", NOTES_DIR),
        ));
    }
    NOTES.index(&resolved).map_err(|e| match e {
        Error::MalformedName { reason, .. } => Error::malformed_name(target, reason),
        other => other,
    })
}

/// Resolve `target` against `base_dir` the way package-relative URIs are
/// resolved: a leading `/` is the package root, `..` climbs one directory.
pub fn resolve_part_path(base_dir: &str, target: &str) -> Result<String> {
    let (mut segments, rest): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (base_dir.split('/').filter(|s| !s.is_empty()).collect(), target),
    };

    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::malformed_name(
                        target,
                        "path climbs above the package root",
                    ));
                }
            }
            s => segments.push(s),
        }
    }

    Ok(segments.join("/"))
}
