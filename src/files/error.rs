/// Error types for file discovery and transfer operations.
use thiserror::Error;

/// Result type for file discovery and transfer operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// Error types for file discovery and transfer operations.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Referenced directory does not exist
    #[error("directory not found: {0}")]
    NotFound(String),

    /// Transfer destination already exists and the policy is `Error`
    #[error("destination already exists: {0}")]
    Conflict(String),

    /// Invalid glob pattern
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
