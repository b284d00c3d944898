/// Error types for archive container operations.
use thiserror::Error;

/// Result type for archive container operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Error types for archive container operations.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive file does not exist
    #[error("archive not found: {0}")]
    NotFound(String),

    /// A requested entry name is absent from the archive
    #[error("entry not found in archive: {0}")]
    MissingEntry(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
