/*! Markup stripping

Parses text as a single XML/HTML element and keeps the concatenated inner text.

Only well-formed markup is accepted: exactly one root element, balanced tags, known entities
and nothing but whitespace outside of the root. Anything else (including plain text, which
has no root element) is a [FailureKind::Parse] failure.

[FailureKind::Parse]: super::FailureKind::Parse
!*/
use quick_xml::events::Event;
use quick_xml::Reader;

use super::transform::{Transform, TransformError};

#[derive(Default)]
pub struct StripHtmlTags;

impl StripHtmlTags {
    fn inner_text(text: &str) -> Result<String, TransformError> {
        let mut reader = Reader::from_str(text);
        let mut out = String::with_capacity(text.len());
        let mut depth: usize = 0;
        let mut has_root = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| TransformError::parse(e.to_string()))?;

            match event {
                Event::Start(e) => {
                    if depth == 0 && has_root {
                        return Err(TransformError::parse("junk after document element"));
                    }
                    for attr in e.attributes() {
                        attr.map_err(|e| TransformError::parse(e.to_string()))?;
                    }
                    has_root = true;
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 0 && has_root {
                        return Err(TransformError::parse("junk after document element"));
                    }
                    for attr in e.attributes() {
                        attr.map_err(|e| TransformError::parse(e.to_string()))?;
                    }
                    has_root = true;
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| TransformError::parse("unexpected closing tag"))?;
                }
                Event::Text(t) => {
                    let t = t
                        .unescape()
                        .map_err(|e| TransformError::parse(e.to_string()))?;
                    if depth > 0 {
                        out.push_str(&t);
                    } else if !t.trim().is_empty() {
                        return Err(TransformError::parse("text outside of the document element"));
                    }
                }
                Event::CData(c) => {
                    if depth == 0 {
                        return Err(TransformError::parse("CDATA outside of the document element"));
                    }
                    out.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Event::Eof => break,
                // comments, declarations, processing instructions and doctypes carry no text
                _ => (),
            }
        }

        if !has_root {
            return Err(TransformError::parse("no element found"));
        }
        if depth > 0 {
            return Err(TransformError::parse("unclosed element"));
        }

        Ok(out.trim().to_string())
    }
}

impl Transform for StripHtmlTags {
    fn name(&self) -> &'static str {
        "remove_html_tags"
    }

    fn transform(&self, text: &str) -> Result<String, TransformError> {
        Self::inner_text(text)
    }
}
