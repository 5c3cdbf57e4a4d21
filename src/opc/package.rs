use crate::opc::error::{OpcError, Result};
use crate::opc::rel::{OFFICE_DOCUMENT_RELTYPE, Relationships, resolve_target};
/// Read-only access to a physical OPC package (a ZIP archive of parts).
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Package member holding the content-type index every OPC package must carry.
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Relationships table for the package itself.
const PACKAGE_RELS_PART: &str = "_rels/.rels";

/// Read-only reader over an OPC document package.
///
/// Owns the package bytes; ZIP member access opens a fresh cursor per call,
/// so all methods take `&self` and the reader can be shared freely between
/// threads. Nothing here mutates the source.
///
/// # Examples
///
/// ```rust,no_run
/// use masthead::opc::package::PackageReader;
///
/// let reader = PackageReader::open("document.docx")?;
/// let document = reader.part(&reader.main_document_part_name()?)?;
/// # Ok::<(), masthead::opc::error::OpcError>(())
/// ```
pub struct PackageReader {
    /// The owned package bytes
    data: Vec<u8>,
}

impl PackageReader {
    /// Open an OPC package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a reader from owned package bytes.
    ///
    /// Validates that the bytes form a ZIP archive carrying the mandatory
    /// `[Content_Types].xml` index.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(&data[..]))
            .map_err(|e| OpcError::MalformedPackage(e.to_string()))?;
        if archive.by_name(CONTENT_TYPES_PART).is_err() {
            return Err(OpcError::MalformedPackage(format!(
                "missing {CONTENT_TYPES_PART}"
            )));
        }
        Ok(Self { data })
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(&self.data[..]))
            .map_err(|e| OpcError::MalformedPackage(e.to_string()))
    }

    /// Read the binary content of a part.
    pub fn part(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut file = archive
            .by_name(name)
            .map_err(|_| OpcError::PartNotFound(name.to_string()))?;

        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Check whether a part exists in the package.
    pub fn has_part(&self, name: &str) -> bool {
        self.archive()
            .map(|mut archive| archive.by_name(name).is_ok())
            .unwrap_or(false)
    }

    /// Parse the relationships table for a part.
    ///
    /// Returns an empty table when the part has no `.rels` entry.
    pub fn rels_for(&self, part_name: &str) -> Result<Relationships> {
        match self.part(&rels_part_name(part_name)) {
            Ok(xml) => Relationships::from_xml(&xml),
            Err(OpcError::PartNotFound(_)) => Ok(Relationships::default()),
            Err(e) => Err(e),
        }
    }

    /// Resolve the package's main document part through the package-level
    /// `officeDocument` relationship.
    pub fn main_document_part_name(&self) -> Result<String> {
        let rels_xml = self.part(PACKAGE_RELS_PART).map_err(|_| {
            OpcError::MalformedPackage(format!("package has no {PACKAGE_RELS_PART} table"))
        })?;
        let rels = Relationships::from_xml(&rels_xml)?;
        let rel = rels.by_reltype(OFFICE_DOCUMENT_RELTYPE).ok_or_else(|| {
            OpcError::MalformedPackage("package has no main document relationship".to_string())
        })?;
        Ok(resolve_target("", rel.target_ref()))
    }
}

/// `.rels` member name for a part ("word/document.xml" becomes
/// "word/_rels/document.xml.rels"; the package itself uses "_rels/.rels").
fn rels_part_name(part_name: &str) -> String {
    match part_name.rfind('/') {
        Some(idx) => format!("{}/_rels/{}.rels", &part_name[..idx], &part_name[idx + 1..]),
        None => format!("_rels/{part_name}.rels"),
    }
}
