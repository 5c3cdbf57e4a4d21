/// The validation orchestrator: owns the cached template structure and
/// produces a `ValidationResult` per candidate document.
use crate::compare::{self, Discrepancy, DiscrepancyKind, Location};
use crate::error::{ExtractError, TemplateLoadError};
use crate::extract;
use crate::structure::HeaderStructure;
use serde::Serialize;
use std::path::Path;

/// Leading sentence of every mismatch report.
const MISMATCH_PREAMBLE: &str = "Document header does not match the required template. \
Copy the header from the template exactly, including fonts, sizes, and formatting.";

/// Outcome of validating one candidate document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True when the candidate header matches the template exactly
    pub is_valid: bool,
    /// Every detected mismatch, in document order
    pub discrepancies: Vec<Discrepancy>,
    /// Multi-line report suitable for showing to the uploader
    pub human_message: String,
}

/// Validates candidate document headers against a reference template.
///
/// The template structure is extracted exactly once, at construction, and
/// never mutated afterwards: a validator that exists always has a usable
/// template, and any number of concurrent `validate_*` calls can share one
/// through a plain reference.
///
/// # Examples
///
/// ```rust,no_run
/// use masthead::HeaderValidator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Load the reference template once, at startup. Failure here is fatal.
/// let validator = HeaderValidator::open("Template.docx")?;
///
/// // Validate each uploaded document against it.
/// let result = validator.validate_path("upload.docx");
/// if !result.is_valid {
///     eprintln!("{}", result.human_message);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HeaderValidator {
    /// The cached template header structure (immutable after construction)
    template: HeaderStructure,
}

impl HeaderValidator {
    /// Load the reference template from a package on disk.
    ///
    /// Errors here mean a misconfigured deployment, not a bad upload, so
    /// they propagate instead of becoming a `ValidationResult`.
    pub fn open<P: AsRef<Path>>(template_path: P) -> Result<Self, TemplateLoadError> {
        let template = extract::extract_from_path(template_path)?;
        Ok(Self::from_template(template))
    }

    /// Load the reference template from in-memory package bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TemplateLoadError> {
        let template = extract::extract_from_bytes(data)?;
        Ok(Self::from_template(template))
    }

    fn from_template(template: HeaderStructure) -> Self {
        log::debug!(
            "template header loaded: {} paragraph(s), {} image(s), {} table(s)",
            template.paragraphs.len(),
            template.images.len(),
            template.tables.len()
        );
        Self { template }
    }

    /// Get the cached template structure.
    #[inline]
    pub fn template(&self) -> &HeaderStructure {
        &self.template
    }

    /// Validate a candidate document on disk.
    ///
    /// Candidate-side failures (unreadable file, malformed package,
    /// missing or empty header) are reported as a failed validation,
    /// never returned as errors: a bad upload is an expected,
    /// user-correctable condition.
    pub fn validate_path<P: AsRef<Path>>(&self, path: P) -> ValidationResult {
        self.finish(extract::extract_from_path(path))
    }

    /// Validate a candidate document from in-memory package bytes.
    pub fn validate_bytes(&self, data: &[u8]) -> ValidationResult {
        self.finish(extract::extract_from_bytes(data))
    }

    fn finish(&self, candidate: Result<HeaderStructure, ExtractError>) -> ValidationResult {
        let candidate = match candidate {
            Ok(candidate) => candidate,
            Err(e) => {
                log::warn!("candidate header extraction failed: {e}");
                return extraction_failure(&e);
            },
        };

        let discrepancies = compare::compare(&self.template, &candidate);
        if discrepancies.is_empty() {
            log::debug!("candidate header matches template");
        } else {
            log::debug!(
                "candidate header rejected with {} discrepancy(ies)",
                discrepancies.len()
            );
        }

        ValidationResult {
            is_valid: discrepancies.is_empty(),
            human_message: render_message(&discrepancies),
            discrepancies,
        }
    }

    /// Render the cached template structure for operator debugging.
    pub fn template_preview(&self) -> String {
        let mut lines = Vec::new();
        lines.push("=".repeat(60));
        lines.push("TEMPLATE HEADER STRUCTURE".to_string());
        lines.push("=".repeat(60));

        for (idx, para) in self.template.paragraphs.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("Paragraph {}:", idx + 1));
            lines.push(format!("  Text: {}", para.text));
            lines.push(format!(
                "  Alignment: {}",
                compare::fmt_alignment(para.alignment)
            ));

            if !para.runs.is_empty() {
                lines.push(format!("  Runs: {}", para.runs.len()));
                for (run_idx, run) in para.runs.iter().enumerate() {
                    if run.text.is_empty() {
                        continue;
                    }
                    let mut style = Vec::new();
                    if run.bold == Some(true) {
                        style.push("Bold");
                    }
                    if run.italic == Some(true) {
                        style.push("Italic");
                    }
                    if run.underline == Some(true) {
                        style.push("Underline");
                    }
                    let style = if style.is_empty() {
                        "Normal".to_string()
                    } else {
                        style.join(", ")
                    };
                    lines.push(format!(
                        "    Run {}: '{}' | Font: {} | Size: {} | Style: {}",
                        run_idx + 1,
                        run.text,
                        compare::fmt_font(run.font_name.as_deref()),
                        compare::fmt_size(run.font_size_pt),
                        style,
                    ));
                }
            }
        }

        if !self.template.images.is_empty() {
            lines.push(String::new());
            lines.push(format!("Images: {}", self.template.images.len()));
            for (idx, image) in self.template.images.iter().enumerate() {
                lines.push(format!("  Image {}: {}", idx + 1, image.target));
            }
        }

        if !self.template.tables.is_empty() {
            lines.push(String::new());
            lines.push(format!("Tables: {}", self.template.tables.len()));
        }

        lines.push("=".repeat(60));
        lines.join("\n")
    }
}

/// A candidate that cannot be extracted fails validation with one
/// synthetic discrepancy describing the failure.
fn extraction_failure(error: &ExtractError) -> ValidationResult {
    ValidationResult {
        is_valid: false,
        discrepancies: vec![Discrepancy::new(
            Location::structure(),
            DiscrepancyKind::Extraction,
            "a readable document header",
            error.to_string(),
        )],
        human_message: format!("Error validating document: {error}"),
    }
}

/// Render the discrepancy list into the multi-line human report.
///
/// Paragraph-scoped discrepancies are grouped under a heading per
/// paragraph; whole-structure lines stand alone. Paragraph, table, row,
/// and cell numbers are 1-based in the report; run numbers are 0-based.
fn render_message(discrepancies: &[Discrepancy]) -> String {
    if discrepancies.is_empty() {
        return "Document header matches the template.".to_string();
    }

    let mut lines = Vec::with_capacity(discrepancies.len() + 1);
    let mut open_group: Option<Location> = None;

    for discrepancy in discrepancies {
        if discrepancy.location.paragraph.is_some() {
            let group = Location {
                run: None,
                ..discrepancy.location
            };
            if open_group != Some(group) {
                lines.push(format!("{}:", group_heading(group)));
                open_group = Some(group);
            }
            lines.push(format!("  - {}", detail_line(discrepancy)));
        } else {
            open_group = None;
            lines.push(summary_line(discrepancy));
        }
    }

    format!(
        "{MISMATCH_PREAMBLE}\n\nDifferences found:\n{}",
        lines.join("\n")
    )
}

/// Heading for a group of paragraph-scoped discrepancies.
fn group_heading(location: Location) -> String {
    let paragraph = location.paragraph.unwrap_or(0) + 1;
    match (location.table, location.row, location.cell) {
        (Some(table), Some(row), Some(cell)) => format!(
            "Table {}, Row {}, Cell {}, Paragraph {}",
            table + 1,
            row + 1,
            cell + 1,
            paragraph
        ),
        _ => format!("Paragraph {paragraph}"),
    }
}

/// One report line for a paragraph-scoped discrepancy.
fn detail_line(discrepancy: &Discrepancy) -> String {
    let (label, quoted) = match discrepancy.kind {
        DiscrepancyKind::Text => ("text mismatch", true),
        DiscrepancyKind::Alignment => ("alignment mismatch", true),
        DiscrepancyKind::Font => ("font mismatch", true),
        DiscrepancyKind::Size => ("font size mismatch", false),
        DiscrepancyKind::Bold => ("bold mismatch", false),
        DiscrepancyKind::Italic => ("italic mismatch", false),
        DiscrepancyKind::Underline => ("underline mismatch", false),
        DiscrepancyKind::RunCount => ("run count mismatch", false),
        _ => ("mismatch", false),
    };
    let values = if quoted {
        format!(
            "expected '{}' but got '{}'",
            discrepancy.expected, discrepancy.actual
        )
    } else {
        format!(
            "expected {} but got {}",
            discrepancy.expected, discrepancy.actual
        )
    };
    match discrepancy.location.run {
        Some(run) => format!("Run {run} {label}: {values}"),
        None => format!("{}: {values}", capitalize(label)),
    }
}

/// One report line for a whole-structure discrepancy.
fn summary_line(discrepancy: &Discrepancy) -> String {
    let location = discrepancy.location;
    let expected = &discrepancy.expected;
    let actual = &discrepancy.actual;
    match discrepancy.kind {
        DiscrepancyKind::ParagraphCount => match (location.table, location.row, location.cell) {
            (Some(table), Some(row), Some(cell)) => format!(
                "Table {}, Row {}, Cell {}: paragraph count mismatch: expected {expected} but got {actual}",
                table + 1,
                row + 1,
                cell + 1
            ),
            _ => format!(
                "Header structure mismatch: expected {expected} paragraphs but got {actual}"
            ),
        },
        DiscrepancyKind::ImageCount => {
            format!("Image count mismatch: expected {expected} but got {actual}")
        },
        DiscrepancyKind::TableCount => {
            format!("Table count mismatch: expected {expected} but got {actual}")
        },
        DiscrepancyKind::RowCount => format!(
            "Table {} row count mismatch: expected {expected} but got {actual}",
            location.table.unwrap_or(0) + 1
        ),
        DiscrepancyKind::CellCount => format!(
            "Table {}, Row {} cell count mismatch: expected {expected} but got {actual}",
            location.table.unwrap_or(0) + 1,
            location.row.unwrap_or(0) + 1
        ),
        DiscrepancyKind::Extraction => format!("Error validating document: {actual}"),
        _ => format!("Mismatch: expected {expected} but got {actual}"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
