//! Plain-text extraction

use crate::error::ExtractResult;
use crate::{Extraction, ExtractionMethod, TextExtractor};
use std::fs;
use std::path::Path;

/// Reads .txt sources directly. Non-UTF-8 content is decoded lossily
/// rather than rejected; a note records that it happened.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> ExtractResult<Extraction> {
        let bytes = fs::read(path)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Extraction::new(text, ExtractionMethod::PlainText)),
            Err(err) => {
                let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
                Ok(Extraction::new(text, ExtractionMethod::PlainText)
                    .with_note("Source was not valid UTF-8; decoded lossily."))
            }
        }
    }
}
