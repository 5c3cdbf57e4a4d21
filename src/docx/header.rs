/// Header part discovery and fragment access.
///
/// Headers are stored in separate XML parts (`/word/header*.xml`), one per
/// `<w:headerReference>` in a section's properties. A document may define
/// several headers (default, first page, even pages) across several
/// sections; extraction walks all of them.
use crate::docx::enums::HeaderType;
use crate::docx::frag::slice_fragments;
use crate::docx::paragraph::Paragraph;
use crate::docx::table::Table;
use crate::error::{ExtractError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// One `<w:headerReference>` found in the document part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRef {
    /// Relationship id resolving to the header part
    r_id: String,
    /// Which pages the header applies to
    header_type: HeaderType,
}

impl HeaderRef {
    /// Get the relationship id.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the header type (default, first page, even pages).
    #[inline]
    pub fn header_type(&self) -> HeaderType {
        self.header_type
    }
}

/// Scan the main document part for header references, in document order.
///
/// References live inside each section's `<w:sectPr>`; scanning the whole
/// part in order visits every section of a multi-section document.
pub fn header_references(document_xml: &[u8]) -> Result<Vec<HeaderRef>> {
    let mut reader = Reader::from_reader(document_xml);
    reader.config_mut().trim_text(true);

    let mut references = Vec::new();
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"headerReference" {
                    let mut r_id = None;
                    let mut header_type = HeaderType::Default;
                    for attr in e.attributes().flatten() {
                        match attr.key.local_name().as_ref() {
                            b"id" => {
                                if let Ok(value) =
                                    attr.decode_and_unescape_value(reader.decoder())
                                {
                                    r_id = Some(value.to_string());
                                }
                            },
                            b"type" => {
                                if let Ok(value) =
                                    attr.decode_and_unescape_value(reader.decoder())
                                {
                                    header_type = HeaderType::from_xml(&value);
                                }
                            },
                            _ => {},
                        }
                    }
                    if let Some(r_id) = r_id {
                        references.push(HeaderRef { r_id, header_type });
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(references)
}

/// A header part in a document package.
///
/// Holds the raw XML of one `/word/header*.xml` part and slices its
/// body-level paragraphs and tables out as fragments.
#[derive(Debug, Clone)]
pub struct HeaderPart {
    /// The raw XML bytes for this header part
    xml_bytes: Vec<u8>,
}

impl HeaderPart {
    /// Create a new HeaderPart from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get the body-level paragraphs of this header, in document order.
    ///
    /// Paragraphs inside tables are not body paragraphs; they are reached
    /// through `tables()`.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        Ok(slice_fragments(&self.xml_bytes, b"p", Some(b"tbl"))?
            .into_iter()
            .map(Paragraph::new)
            .collect())
    }

    /// Get the body-level tables of this header, in document order.
    pub fn tables(&self) -> Result<Vec<Table>> {
        Ok(slice_fragments(&self.xml_bytes, b"tbl", None)?
            .into_iter()
            .map(Table::new)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_references_in_document_order() {
        let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
            <w:body>
                <w:p><w:pPr><w:sectPr>
                    <w:headerReference w:type="first" r:id="rId4"/>
                </w:sectPr></w:pPr></w:p>
                <w:sectPr>
                    <w:headerReference w:type="default" r:id="rId2"/>
                    <w:headerReference w:type="even" r:id="rId3"/>
                </w:sectPr>
            </w:body>
        </w:document>"#;

        let references = header_references(xml).unwrap();
        assert_eq!(references.len(), 3);
        assert_eq!(references[0].r_id(), "rId4");
        assert_eq!(references[0].header_type(), HeaderType::First);
        assert_eq!(references[1].r_id(), "rId2");
        assert_eq!(references[1].header_type(), HeaderType::Default);
        assert_eq!(references[2].header_type(), HeaderType::Even);
    }

    #[test]
    fn test_no_header_references() {
        let xml = b"<w:document><w:body><w:sectPr/></w:body></w:document>";
        assert!(header_references(xml).unwrap().is_empty());
    }

    #[test]
    fn test_header_paragraphs_exclude_table_content() {
        let xml = b"<w:hdr>\
            <w:p><w:r><w:t>body</w:t></w:r></w:p>\
            <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
            </w:hdr>";
        let part = HeaderPart::new(xml.to_vec());

        let paragraphs = part.paragraphs().unwrap();
        assert_eq!(paragraphs.len(), 1);

        let tables = part.tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows().unwrap().len(), 1);
    }
}
