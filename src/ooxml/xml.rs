//! Shared text-run document model for OOXML parts.
//!
//! A part is parsed into an alternating sequence of verbatim byte spans and
//! owned text-run contents. A text run is an element whose local name is `t`
//! bound to the part's markup namespace (WordprocessingML `w:t`, DrawingML
//! `a:t`); namespace and local name are both matched exactly, so a `t`
//! element from an unrelated namespace is never touched.
//!
//! Only run text is ever rewritten. On serialization the raw spans are
//! emitted verbatim, so attributes (e.g. `xml:space="preserve"`), the XML
//! declaration, and every other byte of the part round-trip unchanged;
//! edited run contents are re-escaped on the way out.

use crate::ooxml::error::{DocumentError, Result};
use quick_xml::NsReader;
use quick_xml::escape::{escape, resolve_predefined_entity};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

/// One piece of a parsed part.
#[derive(Debug)]
enum Segment {
    /// Bytes copied verbatim from the source part.
    Raw(Vec<u8>),
    /// Unescaped content of one text run; the only rewritable piece.
    Text(String),
}

/// Parsed form of one XML part, mutable only through its text runs.
///
/// The document owns its segments exclusively; no API hands out a mutable
/// reference into the tree.
#[derive(Debug)]
pub struct TextDocument {
    segments: Vec<Segment>,
}

impl TextDocument {
    /// Parse part bytes, treating `namespace`-bound `t` elements as text runs.
    pub fn parse(bytes: &[u8], namespace: &str) -> Result<Self> {
        let ns = Namespace(namespace.as_bytes());
        let mut reader = NsReader::from_reader(bytes);
        let mut segments = Vec::new();
        let mut raw_start = 0usize;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(ref e)
                    if resolved == ResolveResult::Bound(ns)
                        && e.local_name().as_ref() == b"t" =>
                {
                    // Raw span up to and including the start tag.
                    let content_start = reader.buffer_position() as usize;
                    segments.push(Segment::Raw(bytes[raw_start..content_start].to_vec()));

                    let (text, end_tag_start) = read_run(&mut reader)?;
                    segments.push(Segment::Text(text));
                    raw_start = end_tag_start;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if raw_start < bytes.len() {
            segments.push(Segment::Raw(bytes[raw_start..].to_vec()));
        }
        Ok(Self { segments })
    }

    /// Iterate over the non-empty text runs, in document order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Text(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// Concatenate all non-empty run texts, joined by `separator`.
    pub fn extract_text(&self, separator: &str) -> String {
        self.texts().collect::<Vec<_>>().join(separator)
    }

    /// Literal substring replace inside each run.
    ///
    /// Returns the number of runs changed, not the number of occurrences
    /// replaced. An empty `old` is a no-op returning 0. Matches spanning two
    /// runs are never replaced.
    pub fn replace(&mut self, old: &str, new: &str) -> usize {
        if old.is_empty() {
            return 0;
        }
        let mut changed = 0;
        for segment in &mut self.segments {
            if let Segment::Text(text) = segment
                && text.contains(old)
            {
                *text = text.replace(old, new);
                changed += 1;
            }
        }
        changed
    }

    /// Serialize the part back to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Raw(bytes) => bytes.len(),
                Segment::Text(text) => text.len(),
            })
            .sum();
        let mut out = Vec::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Raw(bytes) => out.extend_from_slice(bytes),
                Segment::Text(text) => out.extend_from_slice(escape(text.as_str()).as_bytes()),
            }
        }
        out
    }
}

/// Consume events until the run's end tag, accumulating its unescaped text.
///
/// Returns the text and the byte offset where the end tag begins, so the
/// caller can resume its verbatim span there.
fn read_run(reader: &mut NsReader<&[u8]>) -> Result<(String, usize)> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_resolved_event()? {
            (_, Event::Text(e)) => {
                let content = e
                    .xml_content()
                    .map_err(|err| DocumentError::Xml(err.to_string()))?;
                text.push_str(&content);
            }
            (_, Event::CData(e)) => {
                let raw = std::str::from_utf8(e.as_ref())
                    .map_err(|err| DocumentError::Xml(err.to_string()))?;
                text.push_str(raw);
            }
            (_, Event::GeneralRef(e)) => {
                if let Some(ch) = e
                    .resolve_char_ref()
                    .map_err(|err| DocumentError::Xml(err.to_string()))?
                {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|err| DocumentError::Xml(err.to_string()))?;
                    match resolve_predefined_entity(name) {
                        Some(value) => text.push_str(value),
                        None => {
                            return Err(DocumentError::Xml(format!(
                                "unresolved entity reference: &{name};"
                            )));
                        }
                    }
                }
            }
            (_, Event::Start(_)) => depth += 1,
            (_, Event::End(_)) if depth == 0 => return Ok((text, pos)),
            (_, Event::End(_)) => depth -= 1,
            (_, Event::Eof) => {
                return Err(DocumentError::Xml(
                    "unexpected end of part inside text run".to_string(),
                ));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_NS: &str = "http://example.com/test";

    fn wrap(body: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><x:doc xmlns:x="{TEST_NS}">{body}</x:doc>"#
        )
        .into_bytes()
    }

    #[test]
    fn test_extract_text() {
        let bytes = wrap("<x:p><x:t>Hello</x:t><x:t> world</x:t></x:p>");
        let doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text(""), "Hello world");
        assert_eq!(doc.extract_text("|"), "Hello| world");
    }

    #[test]
    fn test_empty_runs_are_skipped_when_joining() {
        let bytes = wrap("<x:t>a</x:t><x:t></x:t><x:t>b</x:t>");
        let doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text(" "), "a b");
    }

    #[test]
    fn test_replace_counts_runs_not_occurrences() {
        let bytes = wrap("<x:t>ab ab</x:t><x:t>ab</x:t><x:t>xyz</x:t>");
        let mut doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.replace("ab", "cd"), 2);
        assert_eq!(doc.extract_text(" "), "cd cd cd xyz");
    }

    #[test]
    fn test_replace_empty_old_is_noop() {
        let bytes = wrap("<x:t>unchanged</x:t>");
        let mut doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.replace("", "x"), 0);
        assert_eq!(doc.extract_text(""), "unchanged");
    }

    #[test]
    fn test_replace_is_idempotent() {
        let bytes = wrap("<x:t>old text</x:t>");
        let mut doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.replace("old", "new"), 1);
        assert_eq!(doc.replace("old", "new"), 0);
        assert_eq!(doc.extract_text(""), "new text");
    }

    #[test]
    fn test_untouched_part_round_trips_byte_identical() {
        let bytes = wrap(
            r#"<x:p attr="v"><!-- note --><x:t xml:space="preserve"> spaced </x:t></x:p>"#,
        );
        let doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.to_bytes(), bytes);
    }

    #[test]
    fn test_entities_unescaped_and_reescaped() {
        let bytes = wrap("<x:t>A &amp; B</x:t>");
        let mut doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text(""), "A & B");

        assert_eq!(doc.replace("A & B", "a<b"), 1);
        let out = doc.to_bytes();
        let out_str = std::str::from_utf8(&out).unwrap();
        assert!(out_str.contains("<x:t>a&lt;b</x:t>"), "{out_str}");
    }

    #[test]
    fn test_char_reference() {
        let bytes = wrap("<x:t>caf&#233;</x:t>");
        let doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text(""), "café");
    }

    #[test]
    fn test_foreign_namespace_t_is_ignored() {
        let bytes = wrap(r#"<f:t xmlns:f="urn:other">skip</f:t><x:t>keep</x:t>"#);
        let mut doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text(""), "keep");
        assert_eq!(doc.replace("skip", "nope"), 0);
        // The foreign element survives serialization untouched.
        let out = doc.to_bytes();
        assert!(std::str::from_utf8(&out).unwrap().contains(">skip</f:t>"));
    }

    #[test]
    fn test_self_closing_run_stays_raw() {
        let bytes = wrap("<x:t/><x:t>text</x:t>");
        let doc = TextDocument::parse(&bytes, TEST_NS).unwrap();

        assert_eq!(doc.extract_text("-"), "text");
        assert_eq!(doc.to_bytes(), bytes);
    }

    #[test]
    fn test_malformed_part() {
        let bytes = b"<x:doc xmlns:x=\"http://example.com/test\"><x:t>unclosed";
        let err = TextDocument::parse(bytes, TEST_NS).unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }
}
