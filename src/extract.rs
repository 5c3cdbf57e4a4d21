//! Builds a `HeaderStructure` from a document package.
//!
//! The extractor walks every header part referenced by the document's
//! sections, in document order, and accumulates paragraphs, images, and
//! tables into a single structure. No style inheritance is applied
//! anywhere: the comparator's job is to detect drift from the template's
//! explicit formatting, not to resolve effective computed style.

use crate::docx::header::{HeaderPart, header_references};
use crate::docx::paragraph::Paragraph;
use crate::docx::table::Table;
use crate::error::{ExtractError, Result};
use crate::opc::error::OpcError;
use crate::opc::package::PackageReader;
use crate::opc::rel::resolve_target;
use crate::structure::{
    CellRecord, HeaderStructure, ImageRef, ParagraphRecord, RowRecord, RunRecord, TableRecord,
};
use std::path::Path;

/// Extract the header structure from a package on disk.
pub fn extract_from_path<P: AsRef<Path>>(path: P) -> Result<HeaderStructure> {
    extract(&PackageReader::open(path)?)
}

/// Extract the header structure from in-memory package bytes.
pub fn extract_from_bytes(data: &[u8]) -> Result<HeaderStructure> {
    extract(&PackageReader::from_bytes(data.to_vec())?)
}

/// Extract the header structure from an open package.
pub fn extract(reader: &PackageReader) -> Result<HeaderStructure> {
    let part_names = header_part_names(reader)?;
    log::debug!("found {} header part(s)", part_names.len());

    let mut structure = HeaderStructure::default();
    for part_name in &part_names {
        let part = HeaderPart::new(reader.part(part_name)?);

        for paragraph in part.paragraphs()? {
            let record = paragraph_record(&paragraph)?;
            // Placeholder paragraphs carrying neither text nor an image
            // take no part in the comparison.
            if !record.text.is_empty() || record.has_image {
                structure.paragraphs.push(record);
            }
        }

        for rel in reader.rels_for(part_name)?.iter() {
            if rel.is_image() {
                structure.images.push(ImageRef {
                    rel_id: rel.r_id().to_string(),
                    target: rel.target_ref().to_string(),
                });
            }
        }

        for table in part.tables()? {
            structure.tables.push(table_record(&table)?);
        }
    }

    if structure.is_empty() {
        return Err(ExtractError::EmptyHeader);
    }

    log::debug!(
        "extracted header structure: {} paragraph(s), {} image(s), {} table(s)",
        structure.paragraphs.len(),
        structure.images.len(),
        structure.tables.len()
    );
    Ok(structure)
}

/// Resolve the package's header part names: one entry per distinct
/// referenced part, in first-reference document order (sections may share
/// a header part; processing it once keeps extraction deterministic).
fn header_part_names(reader: &PackageReader) -> Result<Vec<String>> {
    let document_part = reader.main_document_part_name()?;
    let document_xml = reader.part(&document_part)?;
    let references = header_references(&document_xml)?;

    let document_rels = reader.rels_for(&document_part)?;
    let mut names: Vec<String> = Vec::with_capacity(references.len());
    for reference in &references {
        if let Some(rel) = document_rels.by_id(reference.r_id()) {
            let name = resolve_target(&document_part, rel.target_ref());
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    if names.is_empty() {
        return Err(ExtractError::Package(OpcError::PartNotFound(
            "header part (no document section defines a header)".to_string(),
        )));
    }
    Ok(names)
}

/// Build the record for one paragraph fragment.
fn paragraph_record(paragraph: &Paragraph) -> Result<ParagraphRecord> {
    let mut record = ParagraphRecord {
        alignment: paragraph.alignment()?,
        ..ParagraphRecord::default()
    };

    let mut text = String::new();
    for run in paragraph.runs()? {
        let content = run.content()?;
        if content.has_drawing {
            record.has_image = true;
        }
        text.push_str(&content.text);
        record.runs.push(RunRecord {
            text: content.text,
            bold: content.props.bold,
            italic: content.props.italic,
            underline: content.props.underline,
            font_name: content.props.font_name,
            font_size_pt: content.props.font_size_pt,
        });
    }
    record.text = text.trim().to_string();
    Ok(record)
}

/// Build the record for one table fragment, recursing through the
/// paragraph extraction for each cell. Cell paragraphs are kept even when
/// empty so that cell shapes compare positionally.
fn table_record(table: &Table) -> Result<TableRecord> {
    let mut record = TableRecord::default();
    for row in table.rows()? {
        let mut row_record = RowRecord::default();
        for cell in row.cells()? {
            let mut cell_record = CellRecord::default();
            for paragraph in cell.paragraphs()? {
                cell_record.paragraphs.push(paragraph_record(&paragraph)?);
            }
            row_record.cells.push(cell_record);
        }
        record.rows.push(row_record);
    }
    Ok(record)
}
