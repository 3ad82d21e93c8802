//! Thin well-formedness-checking layer over the quick-xml event reader.

use doctext_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Event reader for one archive entry.
///
/// quick-xml reports mismatched end tags, but happily reaches `Eof` with
/// elements still open. This wrapper tracks nesting so truncated documents
/// are reported as malformed, and every error names the entry it came from.
pub(crate) struct Markup<'a> {
    reader: Reader<&'a [u8]>,
    entry: &'a str,
    open: usize,
    depth: usize,
    seen_root: bool,
}

impl<'a> Markup<'a> {
    /// Start reading `content`, which must be UTF-8.
    pub fn new(entry: &'a str, content: &'a [u8]) -> Result<Self> {
        let text = std::str::from_utf8(content).map_err(|e| Error::malformed_markup(entry, e))?;
        Ok(Self {
            reader: Reader::from_str(text),
            entry,
            open: 0,
            depth: 0,
            seen_root: false,
        })
    }

    /// Name of the entry being read.
    pub fn entry(&self) -> &'a str {
        self.entry
    }

    /// Nesting depth of the element the last event belongs to.
    ///
    /// The root element is at depth 1. Text is reported at the depth of
    /// its enclosing element.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Next event, or `None` once the document is complete.
    pub fn next(&mut self) -> Result<Option<Event<'a>>> {
        let event = self.reader.read_event().map_err(|e| {
            Error::malformed_markup(
                self.entry,
                format!("{} at byte {}", e, self.reader.buffer_position()),
            )
        })?;

        match &event {
            Event::Start(_) => {
                if self.open == 0 && self.seen_root {
                    return Err(self.error("more than one root element"));
                }
                self.seen_root = true;
                self.open += 1;
                self.depth = self.open;
            }
            Event::Empty(_) => {
                if self.open == 0 && self.seen_root {
                    return Err(self.error("more than one root element"));
                }
                self.seen_root = true;
                self.depth = self.open + 1;
            }
            Event::End(_) => {
                if self.open == 0 {
                    return Err(self.error("closing tag without an open element"));
                }
                self.depth = self.open;
                self.open -= 1;
            }
            Event::Eof => {
                if self.open > 0 {
                    return Err(self.error("document ends inside an open element"));
                }
                if !self.seen_root {
                    return Err(self.error("document has no root element"));
                }
                return Ok(None);
            }
            Event::Text(text) if self.open == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(self.error("content outside the root element"));
                }
                self.depth = 0;
            }
            Event::CData(_) if self.open == 0 => {
                return Err(self.error("content outside the root element"));
            }
            _ => self.depth = self.open,
        }

        Ok(Some(event))
    }

    /// Unescaped value of an attribute on `element`, by its unprefixed name.
    pub fn attribute(&self, element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
        for attr in element.attributes() {
            let attr = attr.map_err(|e| Error::malformed_markup(self.entry, e))?;
            if attr.key.as_ref() == key {
                let value = attr
                    .unescape_value()
                    .map_err(|e| Error::malformed_markup(self.entry, e))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    /// A malformed-markup error for this entry.
    pub fn error(&self, reason: impl ToString) -> Error {
        Error::malformed_markup(self.entry, reason)
    }
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
