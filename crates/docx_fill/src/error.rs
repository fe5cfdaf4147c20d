//! Error types for template filling

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while filling a DOCX template
#[derive(Debug, Error)]
pub enum FillError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template file does not exist
    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Source archive cannot be opened or parsed
    #[error("Invalid DOCX archive: {0}")]
    InvalidArchive(String),

    /// Archive entry path escapes the extraction root
    #[error("Unsafe ZIP entry path detected: {entry}")]
    ZipSlip { entry: String },

    /// Archive does not contain word/document.xml
    #[error("DOCX does not contain word/document.xml")]
    MissingMainDocument,

    /// Output archive cannot be created
    #[error("Cannot create output archive: {0}")]
    CannotCreateOutput(String),

    /// Placeholders present in the template with no supplied value,
    /// under [`MissingKeyPolicy::Error`](crate::MissingKeyPolicy::Error)
    #[error("Template contains placeholders without values: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

impl From<zip::result::ZipError> for FillError {
    fn from(err: zip::result::ZipError) -> Self {
        FillError::InvalidArchive(err.to_string())
    }
}

/// Result type for fill operations
pub type FillResult<T> = std::result::Result<T, FillError>;
