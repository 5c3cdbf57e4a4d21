use crate::opc::error::{OpcError, Result};
/// Relationship tables for OPC packages.
///
/// Every part may carry a `_rels/<name>.rels` table that connects it to
/// other parts (header parts, embedded images) by relationship id.
use quick_xml::Reader;
use quick_xml::events::Event;

/// Relationship type URI identifying the package's main document part.
pub const OFFICE_DOCUMENT_RELTYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Suffix shared by image relationship type URIs.
const IMAGE_RELTYPE_SUFFIX: &str = "/image";

/// A single relationship from a source part to a target.
///
/// Identified by an rId (relationship id). Internal relationships point at
/// another part; external ones point at a URL outside the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part reference or an external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type URI.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a part reference relative to the
    /// source part. For external relationships, an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Check if this relationship points at an embedded image part.
    #[inline]
    pub fn is_image(&self) -> bool {
        !self.is_external && self.reltype.ends_with(IMAGE_RELTYPE_SUFFIX)
    }
}

/// Collection of relationships from a single source part.
///
/// Relationships keep the order they have in the `.rels` XML so that
/// repeated extraction of the same package stays byte-stable.
#[derive(Debug, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse a relationships table from `.rels` XML bytes.
    ///
    /// Entries missing any of the mandatory `Id`/`Type`/`Target` attributes
    /// are skipped.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Vec::new();
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut r_id = None;
                        let mut reltype = None;
                        let mut target_ref = None;
                        let mut is_external = false;

                        for attr in e.attributes().flatten() {
                            let value = match attr.decode_and_unescape_value(reader.decoder()) {
                                Ok(value) => value.to_string(),
                                Err(_) => continue,
                            };
                            match attr.key.local_name().as_ref() {
                                b"Id" => r_id = Some(value),
                                b"Type" => reltype = Some(value),
                                b"Target" => target_ref = Some(value),
                                b"TargetMode" => is_external = value == "External",
                                _ => {},
                            }
                        }

                        if let (Some(r_id), Some(reltype), Some(target_ref)) =
                            (r_id, reltype, target_ref)
                        {
                            rels.push(Relationship {
                                r_id,
                                reltype,
                                target_ref,
                                is_external,
                            });
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { rels })
    }

    /// Get the number of relationships in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the table has no relationships.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Iterate relationships in file order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.rels.iter()
    }

    /// Look up a relationship by its id.
    pub fn by_id(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the first relationship of the given type.
    pub fn by_reltype(&self, reltype: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.reltype == reltype)
    }
}

/// Resolve a relationship target against the directory of its source part.
///
/// Targets are usually simple names relative to the source part's directory
/// ("header1.xml" against "word/document.xml" gives "word/header1.xml");
/// absolute targets keep their package-root path, and `.`/`..` segments are
/// collapsed.
pub fn resolve_target(source_part: &str, target_ref: &str) -> String {
    if let Some(absolute) = target_ref.strip_prefix('/') {
        return absolute.to_string();
    }

    let base_dir = match source_part.rfind('/') {
        Some(idx) => &source_part[..idx],
        None => "",
    };

    let mut segments: Vec<&str> = if base_dir.is_empty() {
        Vec::new()
    } else {
        base_dir.split('/').collect()
    };
    for segment in target_ref.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS_XML: &[u8] = br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image2.png"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_preserves_file_order() {
        let rels = Relationships::from_xml(RELS_XML).unwrap();
        assert_eq!(rels.len(), 3);

        let ids: Vec<&str> = rels.iter().map(Relationship::r_id).collect();
        assert_eq!(ids, vec!["rId2", "rId1", "rId3"]);
    }

    #[test]
    fn test_image_relationships() {
        let rels = Relationships::from_xml(RELS_XML).unwrap();
        let images: Vec<&Relationship> = rels.iter().filter(|rel| rel.is_image()).collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].target_ref(), "media/image1.png");
    }

    #[test]
    fn test_external_relationship() {
        let rels = Relationships::from_xml(RELS_XML).unwrap();
        let link = rels.by_id("rId3").unwrap();
        assert!(link.is_external());
        assert!(!link.is_image());
    }

    #[test]
    fn test_lookup_by_id_and_reltype() {
        let rels = Relationships::from_xml(RELS_XML).unwrap();
        assert_eq!(rels.by_id("rId1").unwrap().target_ref(), "media/image2.png");
        assert!(rels.by_id("rId99").is_none());
        assert!(rels.by_reltype(OFFICE_DOCUMENT_RELTYPE).is_none());
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("word/document.xml", "header1.xml"),
            "word/header1.xml"
        );
        assert_eq!(
            resolve_target("word/document.xml", "media/image1.png"),
            "word/media/image1.png"
        );
        assert_eq!(
            resolve_target("word/document.xml", "/word/header1.xml"),
            "word/header1.xml"
        );
        assert_eq!(
            resolve_target("word/document.xml", "../customXml/item1.xml"),
            "customXml/item1.xml"
        );
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
    }
}
