/// Paragraph and Run fragments from a header part.
use crate::docx::enums::Alignment;
use crate::docx::frag::slice_fragments;
use crate::error::{ExtractError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// A paragraph in a header part.
///
/// Holds the raw XML of one `<w:p>` element; alignment and runs are parsed
/// out of the fragment on demand.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// The raw XML bytes for this paragraph
    xml_bytes: Vec<u8>,
}

impl Paragraph {
    /// Create a new Paragraph from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get the explicit paragraph alignment from `<w:pPr><w:jc/></w:pPr>`.
    ///
    /// No fallback is applied: a paragraph without `w:jc` reports `None`
    /// even when a style would align it, since the comparison is against
    /// the template's explicit formatting.
    pub fn alignment(&self) -> Result<Option<Alignment>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        let mut in_p_pr = false;
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"pPr" {
                        in_p_pr = true;
                    } else if in_p_pr && name.as_ref() == b"jc" {
                        for attr in e.attributes().flatten() {
                            if attr.key.local_name().as_ref() == b"val"
                                && let Ok(value) = attr.decode_and_unescape_value(reader.decoder())
                            {
                                return Ok(Alignment::from_xml(&value));
                            }
                        }
                    }
                },
                Ok(Event::End(e)) => {
                    if e.local_name().as_ref() == b"pPr" {
                        break;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ExtractError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Get the `<w:r>` runs of this paragraph, in document order.
    ///
    /// Math runs (`m:r`) inside OMML formulas are not word runs and are
    /// not returned.
    pub fn runs(&self) -> Result<SmallVec<[Run; 8]>> {
        Ok(slice_fragments(&self.xml_bytes, b"r", None)?
            .into_iter()
            .map(Run::new)
            .collect())
    }
}

/// Formatting recorded on a run, exactly as written in its `<w:rPr>`.
///
/// `None` means the attribute is not present on the run, which is distinct
/// from an explicit `false` and is never coerced to a default: the point
/// of extraction is to detect drift from the template's explicit
/// formatting, not to resolve effective computed style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    /// Whether the run is bold
    pub bold: Option<bool>,
    /// Whether the run is italic
    pub italic: Option<bool>,
    /// Whether the run is underlined (`w:val="none"` is an explicit false)
    pub underline: Option<bool>,
    /// Typeface name from `w:rFonts w:ascii`
    pub font_name: Option<String>,
    /// Font size in points (`w:sz` stores half-points)
    pub font_size_pt: Option<f64>,
}

/// Text and formatting extracted from a run in a single XML pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContent {
    /// The run text, exact and case-preserved
    pub text: String,
    /// Formatting as present on the run
    pub props: RunProperties,
    /// True when the run carries embedded-graphic markup
    pub has_drawing: bool,
}

/// A run within a paragraph.
///
/// Represents a `<w:r>` element: a region of text with a single set of
/// formatting properties. This is the finest-grained unit the comparator
/// works on.
#[derive(Debug, Clone)]
pub struct Run {
    /// The raw XML bytes for this run
    xml_bytes: Vec<u8>,
}

impl Run {
    /// Create a new Run from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Extract text and formatting properties in a single pass.
    ///
    /// Text collects `<w:t>` content and converts special characters:
    /// - `<w:tab/>` → tab character
    /// - `<w:br/>` → newline character
    ///
    /// Formatting comes from `<w:rPr>`: `w:b`/`w:i` present without
    /// `w:val` means true, `w:val` of "0"/"false" means explicit false;
    /// `w:u` is on for any underline style except `w:val="none"`;
    /// `w:rFonts w:ascii` and `w:sz` map to font name and point size.
    /// A `w:drawing` or `w:pict` element marks the run as image-bearing.
    pub fn content(&self) -> Result<RunContent> {
        // No trim_text here: text inside <w:t> is significant, including
        // leading/trailing whitespace.
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut content = RunContent::default();
        let mut in_r_pr = false;
        let mut in_text = false;
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"t" => in_text = true,
                    b"rPr" => in_r_pr = true,
                    _ => scan_run_element(&e, in_r_pr, &mut content),
                },
                Ok(Event::Empty(e)) => scan_run_element(&e, in_r_pr, &mut content),
                Ok(Event::Text(e)) if in_text => {
                    let text = e
                        .decode()
                        .map_err(|err| ExtractError::Xml(err.to_string()))?;
                    content.text.push_str(&text);
                },
                // `&amp;` and friends arrive as separate reference events.
                Ok(Event::GeneralRef(e)) if in_text => {
                    if let Ok(Some(ch)) = e.resolve_char_ref() {
                        content.text.push(ch);
                    } else if let Ok(name) = std::str::from_utf8(&e)
                        && let Some(resolved) = resolve_predefined_entity(name)
                    {
                        content.text.push_str(resolved);
                    }
                },
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"t" {
                        in_text = false;
                    } else if name.as_ref() == b"rPr" {
                        in_r_pr = false;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ExtractError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(content)
    }
}

/// Handle one element inside a run: special text characters, graphic
/// markers, and (inside `<w:rPr>`) formatting properties.
fn scan_run_element(e: &BytesStart, in_r_pr: bool, content: &mut RunContent) {
    match e.local_name().as_ref() {
        b"tab" => content.text.push('\t'),
        b"br" => content.text.push('\n'),
        b"drawing" | b"pict" => content.has_drawing = true,
        b"b" if in_r_pr => content.props.bold = Some(bool_val(e)),
        b"i" if in_r_pr => content.props.italic = Some(bool_val(e)),
        b"u" if in_r_pr => content.props.underline = Some(underline_val(e)),
        b"rFonts" if in_r_pr => {
            for attr in e.attributes().flatten() {
                if attr.key.local_name().as_ref() == b"ascii"
                    && let Ok(value) = attr.unescape_value()
                {
                    content.props.font_name = Some(value.to_string());
                }
            }
        },
        b"sz" if in_r_pr => {
            for attr in e.attributes().flatten() {
                if attr.key.local_name().as_ref() == b"val"
                    && let Ok(value) = attr.unescape_value()
                    && let Ok(half_points) = value.parse::<f64>()
                {
                    content.props.font_size_pt = Some(half_points / 2.0);
                }
            }
        },
        _ => {},
    }
}

/// `w:val`-style boolean: element present without `w:val` means true.
fn bool_val(e: &BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"val" {
            let value = attr.value.as_ref();
            return value == b"true" || value == b"1";
        }
    }
    true
}

/// `w:u` carries an underline style name; only `none` means explicitly off.
fn underline_val(e: &BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"val" {
            return attr.value.as_ref() != b"none";
        }
    }
    true
}
