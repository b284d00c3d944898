/// Error types for OOXML document operations.
use thiserror::Error;

/// Result type for OOXML document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Error types for OOXML document operations.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Container-level error (package missing, unreadable, not a ZIP)
    #[error("archive error: {0}")]
    Archive(#[from] crate::archive::ArchiveError),

    /// Package opens but a required part is missing or malformed
    #[error("invalid format: {0}")]
    Format(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for DocumentError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        DocumentError::Xml(err.to_string())
    }
}
