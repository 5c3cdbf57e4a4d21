/// Error types for header extraction and validation.
use crate::opc::error::OpcError;
use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error raised while extracting a header structure from a package.
///
/// For candidate documents these are expected, user-correctable conditions
/// and are converted into a failed `ValidationResult` by the validator;
/// they never cross its public boundary as errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Package-level failure: bad container, missing part, IO
    #[error(transparent)]
    Package(#[from] OpcError),

    /// The header exists but carries no paragraphs and no images, which
    /// means the wrong part was parsed or the document truly has no
    /// header content
    #[error("document header has no content")]
    EmptyHeader,

    /// XML parsing error in a header part
    #[error("XML error: {0}")]
    Xml(String),
}

/// Fatal startup error: the reference template itself could not be loaded.
///
/// Raised only during validator construction. A process must not serve
/// validations without a template, so this is not a per-request error.
#[derive(Error, Debug)]
#[error("failed to load template header: {source}")]
pub struct TemplateLoadError {
    #[from]
    source: ExtractError,
}
