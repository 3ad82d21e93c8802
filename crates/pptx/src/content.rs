//! Slide and notes text extraction.
//!
//! Both parsers walk `<a:p>` paragraphs and collect the `<a:r>` runs
//! directly inside them. Slides additionally split runs into title and
//! description by declared font size.

use crate::naming::{NOTES, SLIDE};
use crate::xml::{local_name, Markup};
use doctext_core::{NotesPage, Result, Slide};
use quick_xml::events::{BytesStart, Event};

/// Runs declared at or above this size (hundredths of a point) are titles.
pub const TITLE_SIZE_THRESHOLD: u32 = 2800;

/// A run of text and its declared font size, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    /// Trimmed run text.
    pub text: String,
    /// Value of the run's `sz` attribute.
    pub size: Option<u32>,
}

impl TextRun {
    /// Whether the run is large enough to be treated as title text.
    pub fn is_title(&self) -> bool {
        self.size.is_some_and(|sz| sz >= TITLE_SIZE_THRESHOLD)
    }
}

/// Parse a slide part into its title and description.
pub fn parse_slide(entry: &str, content: &[u8]) -> Result<Slide> {
    let index = SLIDE.index(entry)?;
    let mut slide = Slide::new(index);

    for run in extract_runs(entry, content)? {
        if run.is_title() {
            slide.push_title(&run.text);
        } else {
            slide.push_description(&run.text);
        }
    }

    log::debug!(
        "Slide {}: title {:?}, {} description chars",
        index,
        slide.title,
        slide.description.len()
    );
    Ok(slide)
}

/// Parse a notes slide part into its flat text.
pub fn parse_notes(entry: &str, content: &[u8]) -> Result<NotesPage> {
    let index = NOTES.index(entry)?;
    let mut page = NotesPage::new(index);

    for run in extract_runs(entry, content)? {
        page.push_text(&run.text);
    }

    log::debug!("Notes {}: {} chars", index, page.text.len());
    Ok(page)
}

/// Collect every paragraph run in document order.
///
/// Runs without any text are dropped.
pub fn extract_runs(entry: &str, content: &[u8]) -> Result<Vec<TextRun>> {
    let mut markup = Markup::new(entry, content)?;
    let mut runs = Vec::new();

    // Depth of the enclosing <a:p>, and of the open <a:r> inside it.
    let mut paragraph: Option<usize> = None;
    let mut run: Option<(usize, TextRun)> = None;
    let mut in_text = false;

    while let Some(event) = markup.next()? {
        let depth = markup.depth();
        match event {
            Event::Start(ref e) => match local_name(e.name().as_ref()) {
                b"p" if paragraph.is_none() => paragraph = Some(depth),
                b"r" if paragraph == Some(depth - 1) => {
                    run = Some((depth, TextRun::default()));
                }
                b"rPr" => {
                    if let Some((run_depth, current)) = run.as_mut() {
                        if depth == *run_depth + 1 {
                            current.size = font_size(&markup, e)?;
                        }
                    }
                }
                b"t" => {
                    if matches!(run, Some((run_depth, _)) if depth == run_depth + 1) {
                        in_text = true;
                    }
                }
                _ => {}
            },
            Event::Empty(ref e) => {
                if local_name(e.name().as_ref()) == b"rPr" {
                    if let Some((run_depth, current)) = run.as_mut() {
                        if depth == *run_depth + 1 {
                            current.size = font_size(&markup, e)?;
                        }
                    }
                }
            }
            Event::Text(ref e) if in_text => {
                let text = e.unescape().map_err(|err| markup.error(err))?;
                if let Some((_, current)) = run.as_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(ref e) if in_text => {
                if let Some((_, current)) = run.as_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"t" if in_text => in_text = false,
                b"r" if matches!(run, Some((run_depth, _)) if run_depth == depth) => {
                    if let Some((_, mut finished)) = run.take() {
                        finished.text = finished.text.trim().to_string();
                        if !finished.text.is_empty() {
                            runs.push(finished);
                        }
                    }
                }
                b"p" if paragraph == Some(depth) => paragraph = None,
                _ => {}
            },
            _ => {}
        }
    }

    log::trace!("{}: {} runs", markup.entry(), runs.len());
    Ok(runs)
}

fn font_size(markup: &Markup<'_>, element: &BytesStart<'_>) -> Result<Option<u32>> {
    match markup.attribute(element, b"sz")? {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| markup.error(format!("invalid font size '{}'", raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctext_core::Error;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    fn slide_xml(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {NS}><p:cSld><p:spTree><p:sp><p:txBody>{paragraphs}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
        )
    }

    fn run(size: Option<u32>, text: &str) -> String {
        match size {
            Some(sz) => format!(r#"<a:r><a:rPr lang="en-US" sz="{sz}" dirty="0"/><a:t>{text}</a:t></a:r>"#),
            None => format!(r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{text}</a:t></a:r>"#),
        }
    }

    #[test]
    fn test_threshold_is_exact() {
        let xml = slide_xml(&format!(
            "<a:p>{}{}{}</a:p>",
            run(Some(2800), "Exact"),
            run(Some(2799), "Below"),
            run(None, "Unsized")
        ));
        let slide = parse_slide("ppt/slides/slide1.xml", xml.as_bytes()).unwrap();

        assert_eq!(slide.index, 1);
        assert_eq!(slide.title, "Exact");
        assert_eq!(slide.description, "Below Unsized");
    }

    #[test]
    fn test_title_and_description_keep_encounter_order() {
        let xml = slide_xml(&format!(
            "<a:p>{}{}</a:p><a:p>{}{}</a:p>",
            run(Some(4400), "Annual"),
            run(Some(1800), "first"),
            run(Some(1800), "second"),
            run(Some(3200), "Report"),
        ));
        let slide = parse_slide("ppt/slides/slide2.xml", xml.as_bytes()).unwrap();

        assert_eq!(slide.title, "Annual Report");
        assert_eq!(slide.description, "first second");
    }

    #[test]
    fn test_runs_are_trimmed_and_empty_runs_skipped() {
        let xml = slide_xml(
            r#"<a:p><a:r><a:rPr sz="1800"/><a:t>  padded  </a:t></a:r><a:r><a:rPr sz="1800"/><a:t/></a:r><a:r><a:rPr sz="1800"/></a:r><a:r><a:t>   </a:t></a:r><a:r><a:t>bare</a:t></a:r></a:p>"#,
        );
        let slide = parse_slide("ppt/slides/slide3.xml", xml.as_bytes()).unwrap();

        assert_eq!(slide.title, "");
        assert_eq!(slide.description, "padded bare");
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = slide_xml(
            r#"<a:p><a:r><a:t>Q&amp;A &lt;live&gt;</a:t></a:r><a:r><a:t><![CDATA[raw <text>]]></a:t></a:r></a:p>"#,
        );
        let slide = parse_slide("ppt/slides/slide4.xml", xml.as_bytes()).unwrap();
        assert_eq!(slide.description, "Q&A <live> raw <text>");
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        // Field runs (<a:fld>) and end-paragraph properties carry no run text.
        let xml = slide_xml(
            r#"<a:p><a:fld id="{1}" type="slidenum"><a:t>7</a:t></a:fld><a:r><a:t>kept</a:t></a:r><a:endParaRPr sz="4000"/></a:p>"#,
        );
        let runs = extract_runs("ppt/slides/slide5.xml", xml.as_bytes()).unwrap();
        assert_eq!(
            runs,
            vec![TextRun {
                text: "kept".to_string(),
                size: None
            }]
        );
    }

    #[test]
    fn test_size_only_read_from_own_run_properties() {
        let xml = slide_xml(
            r#"<a:p><a:pPr><a:defRPr sz="4000"/></a:pPr><a:r><a:rPr sz="1200"><a:solidFill/></a:rPr><a:t>small</a:t></a:r></a:p>"#,
        );
        let runs = extract_runs("ppt/slides/slide6.xml", xml.as_bytes()).unwrap();
        assert_eq!(runs[0].size, Some(1200));
        assert!(!runs[0].is_title());
    }

    #[test]
    fn test_invalid_font_size() {
        let xml = slide_xml(&run(None, "x").replace("dirty=\"0\"", "sz=\"big\""));
        let err = parse_slide("ppt/slides/slide1.xml", xml.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { .. }));
    }

    #[test]
    fn test_malformed_slide_markup() {
        let err = parse_slide("ppt/slides/slide1.xml", b"<p:sld><a:p><a:r>").unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { ref entry, .. } if entry == "ppt/slides/slide1.xml"));
    }

    #[test]
    fn test_slide_name_must_carry_index() {
        let xml = slide_xml(&format!("<a:p>{}</a:p>", run(None, "x")));
        let err = parse_slide("ppt/slides/slideFoo.xml", xml.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedName { .. }));
    }

    #[test]
    fn test_notes_are_flat() {
        let xml = format!(
            r#"<p:notes {NS}><p:cSld><p:spTree><p:sp><p:txBody><a:p>{}{}</a:p><a:p>{}</a:p></p:txBody></p:sp></p:spTree></p:cSld></p:notes>"#,
            run(Some(4000), "Remember"),
            run(None, "to smile"),
            run(Some(1200), "and breathe"),
        );
        let page = parse_notes("ppt/notesSlides/notesSlide2.xml", xml.as_bytes()).unwrap();

        assert_eq!(page.index, 2);
        assert_eq!(page.text, "Remember to smile and breathe");
    }

    #[test]
    fn test_empty_slide() {
        let xml = slide_xml("");
        let slide = parse_slide("ppt/slides/slide9.xml", xml.as_bytes()).unwrap();
        assert_eq!(slide, Slide::new(9));
    }
}
