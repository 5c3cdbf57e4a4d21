/// Error types for OPC package operations.
use thiserror::Error;

/// Result type for OPC package operations.
pub type Result<T> = std::result::Result<T, OpcError>;

/// Error types for OPC package operations.
#[derive(Error, Debug)]
pub enum OpcError {
    /// The input is not a valid OPC container (not a ZIP archive, or the
    /// mandatory content-type index is missing)
    #[error("not a valid document package: {0}")]
    MalformedPackage(String),

    /// Package file not found on disk
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// Part not found
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::Xml(err.to_string())
    }
}
