//! Text extraction for source documents
//!
//! The filling pipeline consumes already-normalized plain text; this crate
//! owns that boundary. Extraction strategies are capability objects behind
//! the [`TextExtractor`] trait, selected by file extension:
//!
//! - plain text files are read directly ([`PlainTextExtractor`]),
//! - container formats (PDF) and legacy office formats are host-supplied
//!   implementations injected into [`ExtractorService`] — their internals
//!   are outside this workspace's scope, only the contract lives here.

mod error;
mod normalize;
mod plain;
mod service;

pub use error::{ExtractError, ExtractResult};
pub use normalize::normalize;
pub use plain::PlainTextExtractor;
pub use service::{ExtractorService, ServiceConfig};

use serde::Serialize;
use std::path::Path;

/// How the text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Read directly from a plain-text file
    PlainText,
    /// Pulled out of a container format such as PDF
    ContainerFormat,
    /// Produced by shelling out to an external converter
    ShellConvert,
    /// No extractor produced usable text
    Failed,
}

/// Normalized result of one extraction
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub method: ExtractionMethod,
    /// Set when the source likely needs OCR (e.g. a scanned PDF)
    pub needs_ocr: bool,
    pub notes: Vec<String>,
}

impl Extraction {
    pub fn new(text: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            text: text.into(),
            method,
            needs_ocr: false,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// One extraction strategy
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> ExtractResult<Extraction>;
}
