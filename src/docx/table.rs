/// Table, Row, and Cell fragments from a header part.
use crate::docx::frag::slice_fragments;
use crate::docx::paragraph::Paragraph;
use crate::error::Result;
use smallvec::SmallVec;

/// A table in a header part.
///
/// Represents a `<w:tbl>` element. Tables contain rows, which contain
/// cells, which contain paragraphs; cells reuse the paragraph model
/// recursively.
#[derive(Debug, Clone)]
pub struct Table {
    /// The raw XML bytes for this table
    xml_bytes: Vec<u8>,
}

impl Table {
    /// Create a new Table from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get all rows in this table, in document order.
    ///
    /// Rows of a table nested inside a cell belong to that cell's
    /// fragment, not to this table.
    pub fn rows(&self) -> Result<SmallVec<[Row; 16]>> {
        Ok(slice_fragments(&self.xml_bytes, b"tr", None)?
            .into_iter()
            .map(Row::new)
            .collect())
    }
}

/// A row in a table.
///
/// Represents a `<w:tr>` element.
#[derive(Debug, Clone)]
pub struct Row {
    /// The raw XML bytes for this row
    xml_bytes: Vec<u8>,
}

impl Row {
    /// Create a new Row from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get all cells in this row, in document order.
    pub fn cells(&self) -> Result<SmallVec<[Cell; 16]>> {
        Ok(slice_fragments(&self.xml_bytes, b"tc", None)?
            .into_iter()
            .map(Cell::new)
            .collect())
    }
}

/// A cell in a table row.
///
/// Represents a `<w:tc>` element.
#[derive(Debug, Clone)]
pub struct Cell {
    /// The raw XML bytes for this cell
    xml_bytes: Vec<u8>,
}

impl Cell {
    /// Create a new Cell from XML bytes.
    #[inline]
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get the cell's own paragraphs, in document order.
    ///
    /// Paragraphs of a table nested inside this cell are excluded.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        Ok(slice_fragments(&self.xml_bytes, b"p", Some(b"tbl"))?
            .into_iter()
            .map(Paragraph::new)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_XML: &[u8] = b"<w:tbl>\
        <w:tr>\
            <w:tc><w:p><w:r><w:t>r1c1</w:t></w:r></w:p></w:tc>\
            <w:tc><w:p><w:r><w:t>r1c2</w:t></w:r></w:p></w:tc>\
        </w:tr>\
        <w:tr>\
            <w:tc><w:p><w:r><w:t>r2c1</w:t></w:r></w:p></w:tc>\
            <w:tc><w:p><w:r><w:t>r2c2</w:t></w:r></w:p></w:tc>\
        </w:tr>\
        </w:tbl>";

    #[test]
    fn test_rows_and_cells() {
        let table = Table::new(TABLE_XML.to_vec());
        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 2);

        let cells = rows[1].cells().unwrap();
        assert_eq!(cells.len(), 2);

        let paragraphs = cells[0].paragraphs().unwrap();
        assert_eq!(paragraphs.len(), 1);
        let runs = paragraphs[0].runs().unwrap();
        assert_eq!(runs[0].content().unwrap().text, "r2c1");
    }

    #[test]
    fn test_cell_with_multiple_paragraphs() {
        let cell = Cell::new(b"<w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/></w:tc>".to_vec());
        assert_eq!(cell.paragraphs().unwrap().len(), 2);
    }

    #[test]
    fn test_nested_table_paragraphs_stay_out_of_cell() {
        let cell = Cell::new(
            b"<w:tc>\
            <w:p><w:r><w:t>own</w:t></w:r></w:p>\
            <w:tbl><w:tr><w:tc><w:p><w:r><w:t>nested</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
            </w:tc>"
                .to_vec(),
        );
        let paragraphs = cell.paragraphs().unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            paragraphs[0].runs().unwrap()[0].content().unwrap().text,
            "own"
        );
    }
}
