//! Order-sensitive structural comparison of two header structures.
//!
//! The comparator accumulates every mismatch it finds rather than stopping
//! at the first, so the caller gets one complete report per document. The
//! single exception is a top-level paragraph-count mismatch, after which
//! positional comparison is meaningless.

use crate::docx::enums::Alignment;
use crate::structure::{HeaderStructure, ParagraphRecord, RunRecord, TableRecord};
use serde::Serialize;

/// Absolute tolerance, in points, when comparing run font sizes. Absorbs
/// floating-point rounding from the half-point storage format.
pub const FONT_SIZE_TOLERANCE_PT: f64 = 0.1;

/// What kind of mismatch a discrepancy records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscrepancyKind {
    Text,
    Alignment,
    Font,
    Size,
    Bold,
    Italic,
    Underline,
    RunCount,
    ParagraphCount,
    ImageCount,
    TableCount,
    RowCount,
    CellCount,
    /// Synthetic: the candidate could not be extracted at all
    Extraction,
}

/// Where in the header a discrepancy was found.
///
/// All indices are 0-based. A location with every field `None` refers to
/// the structure as a whole (counts, extraction failures); `table`, `row`,
/// and `cell` are set for mismatches inside a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub table: Option<usize>,
    pub row: Option<usize>,
    pub cell: Option<usize>,
    pub paragraph: Option<usize>,
    pub run: Option<usize>,
}

impl Location {
    /// The structure as a whole.
    pub fn structure() -> Self {
        Self::default()
    }

    /// A paragraph of the header body.
    pub fn paragraph(paragraph: usize) -> Self {
        Self {
            paragraph: Some(paragraph),
            ..Self::default()
        }
    }

    /// A run within a paragraph of the header body.
    pub fn run(paragraph: usize, run: usize) -> Self {
        Self {
            paragraph: Some(paragraph),
            run: Some(run),
            ..Self::default()
        }
    }

    /// A table of the header body.
    pub fn table(table: usize) -> Self {
        Self {
            table: Some(table),
            ..Self::default()
        }
    }

    /// A row within a table.
    pub fn table_row(table: usize, row: usize) -> Self {
        Self {
            table: Some(table),
            row: Some(row),
            ..Self::default()
        }
    }

    /// A cell within a table row.
    pub fn table_cell(table: usize, row: usize, cell: usize) -> Self {
        Self {
            table: Some(table),
            row: Some(row),
            cell: Some(cell),
            ..Self::default()
        }
    }
}

/// One detected mismatch between template and candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub location: Location,
    pub kind: DiscrepancyKind,
    pub expected: String,
    pub actual: String,
}

impl Discrepancy {
    pub(crate) fn new(
        location: Location,
        kind: DiscrepancyKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            location,
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Diff a candidate header structure against the template.
///
/// Emission order follows document order (paragraph index ascending, run
/// index ascending, then whole-structure image/table summaries), so
/// repeated runs over the same inputs produce identical reports.
pub fn compare(template: &HeaderStructure, candidate: &HeaderStructure) -> Vec<Discrepancy> {
    let mut diffs = Vec::new();

    if template.paragraphs.len() != candidate.paragraphs.len() {
        // The only short-circuit: with different paragraph counts the
        // positional pairing below would compare unrelated content.
        diffs.push(Discrepancy::new(
            Location::structure(),
            DiscrepancyKind::ParagraphCount,
            template.paragraphs.len().to_string(),
            candidate.paragraphs.len().to_string(),
        ));
        return diffs;
    }

    for (idx, (t, c)) in template
        .paragraphs
        .iter()
        .zip(&candidate.paragraphs)
        .enumerate()
    {
        compare_paragraph(t, c, Location::structure(), idx, &mut diffs);
    }

    if template.images.len() != candidate.images.len() {
        diffs.push(Discrepancy::new(
            Location::structure(),
            DiscrepancyKind::ImageCount,
            template.images.len().to_string(),
            candidate.images.len().to_string(),
        ));
    }

    if template.tables.len() != candidate.tables.len() {
        diffs.push(Discrepancy::new(
            Location::structure(),
            DiscrepancyKind::TableCount,
            template.tables.len().to_string(),
            candidate.tables.len().to_string(),
        ));
    } else {
        for (table_idx, (t, c)) in template.tables.iter().zip(&candidate.tables).enumerate() {
            compare_table(t, c, table_idx, &mut diffs);
        }
    }

    diffs
}

/// Recurse into a table, reusing the paragraph comparison per cell with a
/// table/row/cell location prefix. Dimension mismatches skip only the
/// affected table, row, or cell.
fn compare_table(
    template: &TableRecord,
    candidate: &TableRecord,
    table: usize,
    diffs: &mut Vec<Discrepancy>,
) {
    if template.rows.len() != candidate.rows.len() {
        diffs.push(Discrepancy::new(
            Location::table(table),
            DiscrepancyKind::RowCount,
            template.rows.len().to_string(),
            candidate.rows.len().to_string(),
        ));
        return;
    }

    for (row_idx, (t_row, c_row)) in template.rows.iter().zip(&candidate.rows).enumerate() {
        if t_row.cells.len() != c_row.cells.len() {
            diffs.push(Discrepancy::new(
                Location::table_row(table, row_idx),
                DiscrepancyKind::CellCount,
                t_row.cells.len().to_string(),
                c_row.cells.len().to_string(),
            ));
            continue;
        }

        for (cell_idx, (t_cell, c_cell)) in t_row.cells.iter().zip(&c_row.cells).enumerate() {
            let base = Location::table_cell(table, row_idx, cell_idx);
            if t_cell.paragraphs.len() != c_cell.paragraphs.len() {
                diffs.push(Discrepancy::new(
                    base,
                    DiscrepancyKind::ParagraphCount,
                    t_cell.paragraphs.len().to_string(),
                    c_cell.paragraphs.len().to_string(),
                ));
                continue;
            }
            for (idx, (t, c)) in t_cell.paragraphs.iter().zip(&c_cell.paragraphs).enumerate() {
                compare_paragraph(t, c, base, idx, diffs);
            }
        }
    }
}

/// Compare one positionally-paired paragraph.
///
/// When run counts match, paragraph text is not compared separately: the
/// paragraph text is derived from its runs, so any difference surfaces as
/// exactly one run-level text discrepancy. When run counts differ, runs
/// cannot be paired up, so the coarse text comparison stands in and
/// run-level comparison is skipped for this paragraph only.
fn compare_paragraph(
    template: &ParagraphRecord,
    candidate: &ParagraphRecord,
    base: Location,
    paragraph: usize,
    diffs: &mut Vec<Discrepancy>,
) {
    let location = Location {
        paragraph: Some(paragraph),
        run: None,
        ..base
    };
    let runs_pair_up = template.runs.len() == candidate.runs.len();

    if !runs_pair_up && template.text != candidate.text {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Text,
            &template.text,
            &candidate.text,
        ));
    }

    if template.alignment != candidate.alignment {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Alignment,
            fmt_alignment(template.alignment),
            fmt_alignment(candidate.alignment),
        ));
    }

    if !runs_pair_up {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::RunCount,
            template.runs.len().to_string(),
            candidate.runs.len().to_string(),
        ));
        return;
    }

    for (run_idx, (t, c)) in template.runs.iter().zip(&candidate.runs).enumerate() {
        let location = Location {
            run: Some(run_idx),
            ..location
        };
        compare_run(t, c, location, diffs);
    }
}

/// Compare one positionally-paired run: text first, then each formatting
/// attribute. Tri-state attributes compare exactly (`unset` is not
/// `false`); font names compare exactly; sizes within tolerance.
fn compare_run(
    template: &RunRecord,
    candidate: &RunRecord,
    location: Location,
    diffs: &mut Vec<Discrepancy>,
) {
    if template.text != candidate.text {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Text,
            &template.text,
            &candidate.text,
        ));
    }
    if template.bold != candidate.bold {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Bold,
            fmt_tristate(template.bold),
            fmt_tristate(candidate.bold),
        ));
    }
    if template.italic != candidate.italic {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Italic,
            fmt_tristate(template.italic),
            fmt_tristate(candidate.italic),
        ));
    }
    if template.underline != candidate.underline {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Underline,
            fmt_tristate(template.underline),
            fmt_tristate(candidate.underline),
        ));
    }
    if template.font_name != candidate.font_name {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Font,
            fmt_font(template.font_name.as_deref()),
            fmt_font(candidate.font_name.as_deref()),
        ));
    }
    if !font_size_matches(template.font_size_pt, candidate.font_size_pt) {
        diffs.push(Discrepancy::new(
            location,
            DiscrepancyKind::Size,
            fmt_size(template.font_size_pt),
            fmt_size(candidate.font_size_pt),
        ));
    }
}

/// Sizes match when both are unset, or both set within the absolute
/// tolerance; set versus unset is a mismatch.
fn font_size_matches(template: Option<f64>, candidate: Option<f64>) -> bool {
    match (template, candidate) {
        (Some(t), Some(c)) => (t - c).abs() <= FONT_SIZE_TOLERANCE_PT,
        (None, None) => true,
        _ => false,
    }
}

pub(crate) fn fmt_tristate(value: Option<bool>) -> String {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unset",
    }
    .to_string()
}

pub(crate) fn fmt_font(value: Option<&str>) -> String {
    match value {
        Some(name) => name.to_string(),
        None => "unset".to_string(),
    }
}

pub(crate) fn fmt_size(value: Option<f64>) -> String {
    match value {
        Some(pt) => format!("{pt}pt"),
        None => "unset".to_string(),
    }
}

pub(crate) fn fmt_alignment(value: Option<Alignment>) -> String {
    match value {
        Some(alignment) => alignment.as_str().to_string(),
        None => "unset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{CellRecord, ImageRef, RowRecord};

    fn run(text: &str) -> RunRecord {
        RunRecord {
            text: text.to_string(),
            ..RunRecord::default()
        }
    }

    fn paragraph(text: &str) -> ParagraphRecord {
        ParagraphRecord {
            text: text.to_string(),
            runs: vec![run(text)],
            ..ParagraphRecord::default()
        }
    }

    fn image(n: usize) -> ImageRef {
        ImageRef {
            rel_id: format!("rId{n}"),
            target: format!("media/image{n}.png"),
        }
    }

    fn structure(texts: &[&str]) -> HeaderStructure {
        HeaderStructure {
            paragraphs: texts.iter().map(|t| paragraph(t)).collect(),
            ..HeaderStructure::default()
        }
    }

    #[test]
    fn test_reflexivity() {
        let header = structure(&["Header A", "Header B"]);
        assert!(compare(&header, &header).is_empty());
    }

    #[test]
    fn test_paragraph_count_short_circuit() {
        let template = structure(&["Header A", "Header B"]);
        let mut candidate = structure(&["Header A"]);
        // An image-count mismatch on top must not be reported.
        candidate.images.push(image(1));

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::ParagraphCount);
        assert_eq!(diffs[0].expected, "2");
        assert_eq!(diffs[0].actual, "1");
        assert_eq!(diffs[0].location, Location::structure());
    }

    #[test]
    fn test_case_sensitive_text_is_one_discrepancy() {
        let template = structure(&["Quality"]);
        let candidate = structure(&["QUALITY"]);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Text);
        assert_eq!(diffs[0].location, Location::run(0, 0));
        assert_eq!(diffs[0].expected, "Quality");
        assert_eq!(diffs[0].actual, "QUALITY");
    }

    #[test]
    fn test_font_mismatch_location_and_values() {
        let mut template = structure(&["Header A", "Header B"]);
        template.paragraphs[1].runs[0].font_name = Some("Century Gothic".to_string());
        let mut candidate = template.clone();
        candidate.paragraphs[1].runs[0].font_name = Some("Arial".to_string());

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Font);
        assert_eq!(diffs[0].location, Location::run(1, 0));
        assert_eq!(diffs[0].expected, "Century Gothic");
        assert_eq!(diffs[0].actual, "Arial");
    }

    #[test]
    fn test_font_name_unset_versus_value_is_a_mismatch() {
        let mut template = structure(&["x"]);
        template.paragraphs[0].runs[0].font_name = Some("Arial".to_string());
        let candidate = structure(&["x"]);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].expected, "Arial");
        assert_eq!(diffs[0].actual, "unset");
    }

    #[test]
    fn test_size_tolerance_boundary() {
        let mut template = structure(&["x"]);
        template.paragraphs[0].runs[0].font_size_pt = Some(11.0);

        let mut near = template.clone();
        near.paragraphs[0].runs[0].font_size_pt = Some(11.05);
        assert!(compare(&template, &near).is_empty());

        let mut far = template.clone();
        far.paragraphs[0].runs[0].font_size_pt = Some(11.2);
        let diffs = compare(&template, &far);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Size);
        assert_eq!(diffs[0].expected, "11pt");
        assert_eq!(diffs[0].actual, "11.2pt");
    }

    #[test]
    fn test_tristate_unset_is_not_false() {
        let mut template = structure(&["x"]);
        template.paragraphs[0].runs[0].bold = Some(false);
        let candidate = structure(&["x"]);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Bold);
        assert_eq!(diffs[0].expected, "false");
        assert_eq!(diffs[0].actual, "unset");
    }

    #[test]
    fn test_accumulation_across_kinds() {
        let mut template = structure(&["Header A"]);
        template.paragraphs[0].runs[0].font_name = Some("Century Gothic".to_string());
        template.images = vec![image(1), image(2)];

        let mut candidate = template.clone();
        candidate.paragraphs[0].runs[0].font_name = Some("Arial".to_string());
        candidate.images.pop();

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Font);
        assert_eq!(diffs[1].kind, DiscrepancyKind::ImageCount);
        assert_eq!(diffs[1].expected, "2");
        assert_eq!(diffs[1].actual, "1");
    }

    #[test]
    fn test_run_count_mismatch_skips_that_paragraph_only() {
        let mut template = structure(&["ab", "cd"]);
        template.paragraphs[0].runs = vec![run("a"), run("b")];
        let mut candidate = template.clone();
        candidate.paragraphs[0].runs = vec![run("ab")];
        candidate.paragraphs[1].runs[0].italic = Some(true);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DiscrepancyKind::RunCount);
        assert_eq!(diffs[0].location, Location::paragraph(0));
        // The second paragraph still gets run-level comparison.
        assert_eq!(diffs[1].kind, DiscrepancyKind::Italic);
        assert_eq!(diffs[1].location, Location::run(1, 0));
    }

    #[test]
    fn test_alignment_mismatch() {
        let mut template = structure(&["x"]);
        template.paragraphs[0].alignment = Some(Alignment::Center);
        let candidate = structure(&["x"]);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Alignment);
        assert_eq!(diffs[0].expected, "center");
        assert_eq!(diffs[0].actual, "unset");
    }

    fn one_cell_table(text: &str) -> TableRecord {
        TableRecord {
            rows: vec![RowRecord {
                cells: vec![CellRecord {
                    paragraphs: vec![paragraph(text)],
                }],
            }],
        }
    }

    #[test]
    fn test_table_cell_recursion() {
        let mut template = structure(&["x"]);
        template.tables.push(one_cell_table("Quality"));
        let mut candidate = structure(&["x"]);
        candidate.tables.push(one_cell_table("QUALITY"));

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::Text);
        assert_eq!(
            diffs[0].location,
            Location {
                run: Some(0),
                paragraph: Some(0),
                ..Location::table_cell(0, 0, 0)
            }
        );
    }

    #[test]
    fn test_table_row_count_mismatch() {
        let mut template = structure(&["x"]);
        template.tables.push(one_cell_table("a"));
        template.tables[0].rows.push(RowRecord::default());
        let mut candidate = structure(&["x"]);
        candidate.tables.push(one_cell_table("a"));

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::RowCount);
        assert_eq!(diffs[0].location, Location::table(0));
    }

    #[test]
    fn test_table_count_mismatch_skips_recursion() {
        let mut template = structure(&["x"]);
        template.tables.push(one_cell_table("a"));
        let candidate = structure(&["x"]);

        let diffs = compare(&template, &candidate);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiscrepancyKind::TableCount);
    }
}
