//! Error types for text extraction

use thiserror::Error;

/// Errors that can occur while extracting text from a source document
#[derive(Debug, Error)]
pub enum ExtractError {
    /// IO error reading the source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No extractor registered for this file extension
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// Extraction produced no text and the caller requires some
    #[error("Extraction produced no text")]
    EmptyResult,

    /// Strategy-specific failure, reported by the extractor itself
    #[error("Extractor failed: {0}")]
    Extractor(String),
}

/// Result type for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
