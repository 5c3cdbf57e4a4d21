//! masthead - header conformance validation for Word documents.
//!
//! Decides whether the header region of an uploaded `.docx` package
//! matches a reference template *exactly*: text content (case-sensitive),
//! run-level formatting (font family, point size, bold/italic/underline),
//! paragraph alignment, embedded-image count, and table structure.
//!
//! The crate is built for document-intake pipelines: the template is
//! loaded once at startup, every upload is validated against it, and a
//! failed validation carries a complete, human-readable list of
//! differences rather than stopping at the first one.
//!
//! # Example
//!
//! ```no_run
//! use masthead::HeaderValidator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the reference template once, at startup
//! let validator = HeaderValidator::open("Template.docx")?;
//!
//! // Validate each uploaded document against it
//! let result = validator.validate_path("upload.docx");
//! if result.is_valid {
//!     println!("header matches the template");
//! } else {
//!     eprintln!("{}", result.human_message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Four layers, leaves first:
//! - [`opc`]: read-only access to the document container (a ZIP archive
//!   of XML parts plus relationship tables)
//! - [`docx`]: WordprocessingML fragment parsing for header parts
//! - [`extract`] / [`compare`]: build a [`HeaderStructure`] per package
//!   and diff candidate against template into [`Discrepancy`] records
//! - [`validator`]: the stateful orchestrator producing
//!   [`ValidationResult`]s
//!
//! A malformed or header-less upload is reported as a failed validation,
//! never as an error from `validate_*`; only template loading at startup
//! can fail hard.

pub mod compare;
pub mod docx;
pub mod error;
pub mod extract;
pub mod opc;
pub mod structure;
pub mod validator;

pub use compare::{Discrepancy, DiscrepancyKind, FONT_SIZE_TOLERANCE_PT, Location};
pub use docx::enums::Alignment;
pub use error::{ExtractError, TemplateLoadError};
pub use structure::{
    CellRecord, HeaderStructure, ImageRef, ParagraphRecord, RowRecord, RunRecord, TableRecord,
};
pub use validator::{HeaderValidator, ValidationResult};
