/// Open Packaging Conventions (OPC) container access.
///
/// A `.docx` file is an OPC package: a ZIP archive of XML "parts" wired
/// together by relationship tables. This module provides the read-only
/// package layer the header extractor is built on:
/// - `PackageReader`: part access over a ZIP archive
/// - `Relationships`: parsed `_rels/*.rels` tables
pub mod error;
pub mod package;
pub mod rel;

pub use error::OpcError;
pub use package::PackageReader;
pub use rel::{Relationship, Relationships};
