//! In-memory model of an extracted document header.
//!
//! A `HeaderStructure` is built once per package and is plain immutable
//! data afterwards: extraction is deterministic, so byte-identical input
//! packages always produce field-identical structures.

use crate::docx::enums::Alignment;
use serde::Serialize;

/// Everything captured from the header region of one document package.
///
/// Paragraph order is the primary structural axis; images and tables are
/// carried in document order as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderStructure {
    /// Body paragraphs across all header parts, in document order
    pub paragraphs: Vec<ParagraphRecord>,
    /// Embedded images, in relationship-table order
    pub images: Vec<ImageRef>,
    /// Body tables across all header parts, in document order
    pub tables: Vec<TableRecord>,
}

impl HeaderStructure {
    /// True when the header carries no paragraphs and no images.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.images.is_empty()
    }
}

/// One paragraph of header content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParagraphRecord {
    /// Concatenated run text, trimmed. May be empty when the paragraph
    /// exists only to anchor an image.
    pub text: String,
    /// Explicit alignment; `None` when the paragraph sets none, which is
    /// distinct from an explicit `left`
    pub alignment: Option<Alignment>,
    /// Runs in document order. A paragraph with zero runs is valid.
    pub runs: Vec<RunRecord>,
    /// True when any run carries embedded-graphic markup
    pub has_image: bool,
}

/// The finest-grained unit of comparison: one formatted text run.
///
/// Formatting is recorded exactly as present on the run. `None` means
/// "not specified there" and is never coerced to a default during
/// comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunRecord {
    /// Exact run text; case preserved, never normalized
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_name: Option<String>,
    pub font_size_pt: Option<f64>,
}

/// Identity of one embedded header image.
///
/// Only the count of these is compared; pixel content is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Relationship id (e.g., "rId5")
    pub rel_id: String,
    /// Relationship target (e.g., "media/image1.png")
    pub target: String,
}

/// A header table: ordered rows of ordered cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRecord {
    pub rows: Vec<RowRecord>,
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowRecord {
    pub cells: Vec<CellRecord>,
}

/// One table cell; cells reuse the paragraph model recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellRecord {
    pub paragraphs: Vec<ParagraphRecord>,
}
