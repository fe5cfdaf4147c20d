//! Owned XML model of one archive part
//!
//! A part is held as a flat buffer of owned quick-xml events. Untouched
//! events are replayed verbatim on serialization, so markup the rewriter
//! never edits round-trips byte-identically. Text segments are index spans
//! into this buffer, not independent handles; they become stale as soon as
//! the buffer is rebuilt.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use std::ops::Range;

/// Attribute Word uses to keep significant whitespace in a `<w:t>`
const XML_SPACE: &[u8] = b"xml:space";

/// One XML part as an owned event buffer
pub(crate) struct PartDocument {
    events: Vec<Event<'static>>,
}

/// Kind of text-bearing leaf element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    /// `<w:t>` run text
    RunText,
    /// `<w:instrText>` field instruction text
    FieldInstruction,
}

/// One text-bearing leaf inside a paragraph. `span` is the inclusive event
/// index range of the owning element (start tag through end tag, or a
/// single self-closing tag).
#[derive(Debug, Clone)]
pub(crate) struct TextSegment {
    pub span: (usize, usize),
    pub kind: SegmentKind,
    pub text: String,
    pub dirty: bool,
}

/// A pending mutation of one segment's element
#[derive(Debug)]
pub(crate) struct SegmentEdit {
    pub span: (usize, usize),
    pub text: String,
    /// Some(true) = ensure xml:space="preserve", Some(false) = drop it,
    /// None = leave the start tag's attributes alone
    pub preserve: Option<bool>,
}

impl PartDocument {
    /// Parse a part. Whitespace-only text nodes are kept: a rewriter must
    /// never normalize content it does not touch.
    pub fn parse(xml: &str) -> Result<Self, String> {
        let mut reader = Reader::from_str(xml);
        let mut events = Vec::new();
        loop {
            match reader.read_event().map_err(|e| e.to_string())? {
                Event::Eof => break,
                ev => events.push(ev.into_owned()),
            }
        }
        Ok(Self { events })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for ev in &self.events {
            writer.write_event(ev.clone()).map_err(|e| e.to_string())?;
        }
        Ok(writer.into_inner().into_inner())
    }

    /// Index ranges of top-level `<w:p>` elements. A paragraph nested in a
    /// text box is covered by its enclosing paragraph's segment scan, so
    /// only outermost paragraphs are returned — each leaf is visited once.
    pub fn paragraphs(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut open: Option<usize> = None;
        let mut depth = 0usize;
        for (i, ev) in self.events.iter().enumerate() {
            match ev {
                Event::Start(e) if is_local(e.name().as_ref(), b"p") => {
                    if open.is_none() {
                        open = Some(i);
                    }
                    depth += 1;
                }
                Event::End(e) if is_local(e.name().as_ref(), b"p") => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Some(start) = open.take() {
                            ranges.push(start..i + 1);
                        }
                    }
                }
                _ => {}
            }
        }
        ranges
    }

    /// Text segments under one paragraph, in document order, at any depth
    pub fn segments(
        &self,
        paragraph: Range<usize>,
        include_field_instructions: bool,
    ) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut i = paragraph.start;
        while i < paragraph.end {
            match &self.events[i] {
                Event::Start(e) => {
                    if let Some(kind) = segment_kind(e.name().as_ref(), include_field_instructions)
                    {
                        let (text, end) = self.read_leaf_text(i, paragraph.end);
                        segments.push(TextSegment {
                            span: (i, end),
                            kind,
                            text,
                            dirty: false,
                        });
                        i = end + 1;
                        continue;
                    }
                }
                Event::Empty(e) => {
                    if let Some(kind) = segment_kind(e.name().as_ref(), include_field_instructions)
                    {
                        segments.push(TextSegment {
                            span: (i, i),
                            kind,
                            text: String::new(),
                            dirty: false,
                        });
                    }
                }
                _ => {}
            }
            i += 1;
        }
        segments
    }

    /// Decoded text inside the leaf element starting at `start`.
    /// Returns the text and the index of the element's end tag.
    fn read_leaf_text(&self, start: usize, limit: usize) -> (String, usize) {
        let mut text = String::new();
        let mut i = start + 1;
        while i < limit {
            match &self.events[i] {
                Event::Text(t) => {
                    if let Ok(decoded) = t.unescape() {
                        text.push_str(&decoded);
                    }
                }
                Event::CData(c) => {
                    text.push_str(&String::from_utf8_lossy(c));
                }
                Event::End(_) => return (text, i),
                _ => {}
            }
            i += 1;
        }
        (text, limit.saturating_sub(1))
    }

    /// Rebuild the buffer, replacing each edited element with its new text
    /// and (for run text) the re-evaluated whitespace-preserve marking.
    /// Edits must be non-overlapping and sorted by span start.
    pub fn apply_edits(&mut self, edits: &[SegmentEdit]) {
        if edits.is_empty() {
            return;
        }
        let old = std::mem::take(&mut self.events);
        let mut rebuilt = Vec::with_capacity(old.len());
        let mut cursor = 0usize;

        for edit in edits {
            let (span_start, span_end) = edit.span;
            rebuilt.extend(old[cursor..span_start].iter().cloned());

            let (name, start_tag) = match &old[span_start] {
                Event::Start(e) | Event::Empty(e) => (
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    rebuild_start_tag(e, edit.preserve),
                ),
                // Span indices always point at an element tag
                other => {
                    rebuilt.push(other.clone());
                    cursor = span_start + 1;
                    continue;
                }
            };

            rebuilt.push(Event::Start(start_tag));
            if !edit.text.is_empty() {
                rebuilt.push(Event::Text(BytesText::new(&edit.text).into_owned()));
            }
            rebuilt.push(Event::End(quick_xml::events::BytesEnd::new(name)));
            cursor = span_end + 1;
        }

        rebuilt.extend(old[cursor..].iter().cloned());
        self.events = rebuilt;
    }
}

/// Copy a start tag, optionally forcing or dropping xml:space="preserve"
fn rebuild_start_tag(original: &BytesStart<'_>, preserve: Option<bool>) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(original.name().as_ref()).into_owned();
    let mut tag = BytesStart::new(name);
    for attr in original.attributes().flatten() {
        if preserve.is_some() && attr.key.as_ref() == XML_SPACE {
            continue;
        }
        tag.push_attribute(attr);
    }
    if preserve == Some(true) {
        tag.push_attribute(("xml:space", "preserve"));
    }
    tag
}

fn segment_kind(name: &[u8], include_field_instructions: bool) -> Option<SegmentKind> {
    if is_local(name, b"t") {
        Some(SegmentKind::RunText)
    } else if include_field_instructions && is_local(name, b"instrText") {
        Some(SegmentKind::FieldInstruction)
    } else {
        None
    }
}

/// Match an element name with an optional namespace prefix (`t` or `w:t`)
fn is_local(name: &[u8], expected: &[u8]) -> bool {
    if name == expected {
        return true;
    }
    name.len() > expected.len()
        && name.ends_with(expected)
        && name[name.len() - expected.len() - 1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARA: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:body><w:p><w:r><w:t>Hello &amp; bye</w:t></w:r>"#,
        r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve"> world</w:t></w:r>"#,
        r#"<w:r><w:instrText>PAGE</w:instrText></w:r>"#,
        r#"<w:r><w:t/></w:r></w:p></w:body></w:document>"#
    );

    #[test]
    fn parse_serialize_round_trips_untouched_markup() {
        let doc = PartDocument::parse(PARA).unwrap();
        let out = doc.serialize().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), PARA);
    }

    #[test]
    fn segments_are_collected_in_document_order() {
        let doc = PartDocument::parse(PARA).unwrap();
        let paragraphs = doc.paragraphs();
        assert_eq!(paragraphs.len(), 1);

        let segments = doc.segments(paragraphs[0].clone(), false);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello & bye", " world", ""]);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::RunText));

        let with_instr = doc.segments(paragraphs[0].clone(), true);
        assert_eq!(with_instr.len(), 4);
        assert_eq!(with_instr[2].kind, SegmentKind::FieldInstruction);
        assert_eq!(with_instr[2].text, "PAGE");
    }

    #[test]
    fn nested_paragraphs_are_scanned_once() {
        let xml = r#"<w:body><w:p><w:r><w:t>outer</w:t></w:r><w:txbxContent><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:txbxContent></w:p></w:body>"#;
        let doc = PartDocument::parse(xml).unwrap();
        let paragraphs = doc.paragraphs();
        assert_eq!(paragraphs.len(), 1);
        let segments = doc.segments(paragraphs[0].clone(), false);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text, "inner");
    }

    #[test]
    fn apply_edits_rewrites_text_and_escapes() {
        let mut doc = PartDocument::parse(PARA).unwrap();
        let paragraphs = doc.paragraphs();
        let segments = doc.segments(paragraphs[0].clone(), false);

        doc.apply_edits(&[SegmentEdit {
            span: segments[0].span,
            text: "A < B".to_string(),
            preserve: None,
        }]);
        let out = String::from_utf8(doc.serialize().unwrap()).unwrap();
        assert!(out.contains("<w:t>A &lt; B</w:t>"));
        assert!(out.contains(r#"<w:t xml:space="preserve"> world</w:t>"#));
    }

    #[test]
    fn preserve_toggle_adds_and_removes_attribute() {
        let mut doc = PartDocument::parse(PARA).unwrap();
        let paragraphs = doc.paragraphs();
        let segments = doc.segments(paragraphs[0].clone(), false);

        doc.apply_edits(&[
            SegmentEdit {
                span: segments[0].span,
                text: "  padded  ".to_string(),
                preserve: Some(true),
            },
            SegmentEdit {
                span: segments[1].span,
                text: "tight".to_string(),
                preserve: Some(false),
            },
        ]);
        let out = String::from_utf8(doc.serialize().unwrap()).unwrap();
        assert!(out.contains(r#"<w:t xml:space="preserve">  padded  </w:t>"#));
        assert!(out.contains("<w:t>tight</w:t>"));
    }

    #[test]
    fn empty_segment_becomes_open_close_pair() {
        let mut doc = PartDocument::parse(PARA).unwrap();
        let paragraphs = doc.paragraphs();
        let segments = doc.segments(paragraphs[0].clone(), false);

        doc.apply_edits(&[SegmentEdit {
            span: segments[2].span,
            text: "filled".to_string(),
            preserve: Some(false),
        }]);
        let out = String::from_utf8(doc.serialize().unwrap()).unwrap();
        assert!(out.contains("<w:t>filled</w:t>"));
        assert!(!out.contains("<w:t/>"));
    }
}
