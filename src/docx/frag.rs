//! XML fragment slicing shared by header, paragraph, and table parsing.
//!
//! Header parts are parsed as raw XML fragments: each structural element
//! (`w:p`, `w:tbl`, `w:tr`, `w:tc`, `w:r`) is sliced out as bytes and
//! handed to a type that parses just that fragment. Slicing is streaming
//! and allocates only for the fragments themselves.

use crate::error::{ExtractError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Slice the raw XML of every matching element out of `xml`, in document
/// order.
///
/// `target` is a local element name matched in the WordprocessingML
/// namespace (`w:` prefix or none), which keeps math runs (`m:r`) out of
/// word-run slices. An element nested inside an already-matched fragment
/// stays part of that fragment. `skip_within` names an element whose
/// subtrees are excluded from matching entirely; it is used to keep table
/// paragraphs out of body paragraph lists.
pub(crate) fn slice_fragments(
    xml: &[u8],
    target: &[u8],
    skip_within: Option<&[u8]>,
) -> Result<Vec<Vec<u8>>> {
    // Text nodes are copied verbatim (no trim_text): run text must survive
    // slicing exactly, including significant leading/trailing whitespace.
    let mut reader = Reader::from_reader(xml);

    let mut fragments = Vec::new();
    let mut current = Vec::with_capacity(2048);
    let mut in_fragment = false;
    let mut depth = 0usize;
    let mut skip_depth = 0usize;
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if in_fragment {
                    depth += 1;
                    append_open(&mut current, &e, false);
                } else if skip_depth > 0 {
                    if skip_within.is_some_and(|skip| is_wml(&e, skip)) {
                        skip_depth += 1;
                    }
                } else if skip_within.is_some_and(|skip| is_wml(&e, skip)) {
                    skip_depth = 1;
                } else if is_wml(&e, target) {
                    in_fragment = true;
                    depth = 1;
                    current.clear();
                    append_open(&mut current, &e, false);
                }
            },
            Ok(Event::Empty(e)) => {
                if in_fragment {
                    append_open(&mut current, &e, true);
                } else if skip_depth == 0 && is_wml(&e, target) {
                    // Self-closing target, e.g. an empty placeholder paragraph
                    let mut fragment = Vec::new();
                    append_open(&mut fragment, &e, true);
                    fragments.push(fragment);
                }
            },
            Ok(Event::End(e)) => {
                if in_fragment {
                    current.extend_from_slice(b"</");
                    current.extend_from_slice(e.name().as_ref());
                    current.push(b'>');

                    depth -= 1;
                    if depth == 0 {
                        fragments.push(std::mem::take(&mut current));
                        current = Vec::with_capacity(2048);
                        in_fragment = false;
                    }
                } else if skip_depth > 0
                    && skip_within.is_some_and(|skip| e.local_name().as_ref() == skip)
                {
                    skip_depth -= 1;
                }
            },
            Ok(Event::Text(e)) if in_fragment => {
                current.extend_from_slice(e.as_ref());
            },
            Ok(Event::CData(e)) if in_fragment => {
                current.extend_from_slice(b"<![CDATA[");
                current.extend_from_slice(e.as_ref());
                current.extend_from_slice(b"]]>");
            },
            // Entity and character references are reported separately from
            // text; re-serialize them so run parsing can resolve them.
            Ok(Event::GeneralRef(e)) if in_fragment => {
                current.push(b'&');
                current.extend_from_slice(&e);
                current.push(b';');
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(fragments)
}

/// Check the element is `target` in the WordprocessingML namespace
/// (`w:` prefixed or unprefixed).
fn is_wml(e: &BytesStart, target: &[u8]) -> bool {
    e.local_name().as_ref() == target
        && (e.name().as_ref() == target || e.name().as_ref().starts_with(b"w:"))
}

/// Append an opening (or self-closing) tag with its attributes.
fn append_open(out: &mut Vec<u8>, e: &BytesStart, empty: bool) {
    out.push(b'<');
    out.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        out.push(b' ');
        out.extend_from_slice(attr.key.as_ref());
        out.extend_from_slice(b"=\"");
        out.extend_from_slice(&attr.value);
        out.push(b'"');
    }
    if empty {
        out.extend_from_slice(b"/>");
    } else {
        out.push(b'>');
    }
}
