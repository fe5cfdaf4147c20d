//! Extension-dispatching extraction service

use crate::error::{ExtractError, ExtractResult};
use crate::normalize::normalize;
use crate::plain::PlainTextExtractor;
use crate::{Extraction, ExtractionMethod, TextExtractor};
use std::path::Path;

/// Limits and requirements for one service instance
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Cap on normalized output length, in characters
    pub max_chars: usize,
    /// Fail with [`ExtractError::EmptyResult`] instead of returning an
    /// empty extraction
    pub require_non_empty: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_chars: 60_000,
            require_non_empty: false,
        }
    }
}

/// Dispatches to an extraction strategy by file extension and normalizes
/// the result. The PDF and office strategies are injected by the host;
/// only the plain-text one ships here.
pub struct ExtractorService {
    config: ServiceConfig,
    plain: Box<dyn TextExtractor>,
    container: Option<Box<dyn TextExtractor>>,
    office: Option<Box<dyn TextExtractor>>,
}

impl ExtractorService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            plain: Box::new(PlainTextExtractor::new()),
            container: None,
            office: None,
        }
    }

    /// Register the container-format (PDF) strategy
    pub fn with_container(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.container = Some(extractor);
        self
    }

    /// Register the legacy-office (shell convert) strategy
    pub fn with_office(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.office = Some(extractor);
        self
    }

    pub fn extract(&self, path: &Path) -> ExtractResult<Extraction> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let extractor: &dyn TextExtractor = match ext.as_str() {
            "txt" => self.plain.as_ref(),
            "pdf" => self
                .container
                .as_deref()
                .ok_or_else(|| ExtractError::UnsupportedExtension(ext.clone()))?,
            "doc" | "docx" | "xls" | "xlsx" => self
                .office
                .as_deref()
                .ok_or_else(|| ExtractError::UnsupportedExtension(ext.clone()))?,
            _ => return Err(ExtractError::UnsupportedExtension(ext)),
        };

        let mut extraction = extractor.extract(path)?;
        extraction.text = normalize(&extraction.text, self.config.max_chars);

        if extraction.text.is_empty() {
            extraction
                .notes
                .push("Text is empty after normalization.".to_string());
            // A PDF with no text layer is the classic scanned-document case
            if ext == "pdf" {
                extraction.needs_ocr = true;
            }
            if self.config.require_non_empty {
                return Err(ExtractError::EmptyResult);
            }
            extraction.method = ExtractionMethod::Failed;
            tracing::warn!(path = %path.display(), "extraction produced no text");
        }

        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct FixedExtractor(&'static str, ExtractionMethod);

    impl TextExtractor for FixedExtractor {
        fn extract(&self, _path: &Path) -> ExtractResult<Extraction> {
            Ok(Extraction::new(self.0, self.1))
        }
    }

    #[test]
    fn dispatches_txt_to_plain_extractor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "  spaced out  ").unwrap();

        let service = ExtractorService::new(ServiceConfig::default());
        let extraction = service.extract(&path).unwrap();
        assert_eq!(extraction.text, "spaced out");
        assert_eq!(extraction.method, ExtractionMethod::PlainText);
    }

    #[test]
    fn pdf_without_registered_strategy_is_unsupported() {
        let service = ExtractorService::new(ServiceConfig::default());
        let err = service.extract(Path::new("report.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedExtension(_)));
    }

    #[test]
    fn injected_container_strategy_is_used() {
        let service = ExtractorService::new(ServiceConfig::default())
            .with_container(Box::new(FixedExtractor("from pdf", ExtractionMethod::ContainerFormat)));
        let extraction = service.extract(Path::new("report.pdf")).unwrap();
        assert_eq!(extraction.text, "from pdf");
        assert_eq!(extraction.method, ExtractionMethod::ContainerFormat);
    }

    #[test]
    fn empty_pdf_text_flags_ocr() {
        let service = ExtractorService::new(ServiceConfig::default())
            .with_container(Box::new(FixedExtractor("", ExtractionMethod::ContainerFormat)));
        let extraction = service.extract(Path::new("scan.pdf")).unwrap();
        assert!(extraction.needs_ocr);
        assert_eq!(extraction.method, ExtractionMethod::Failed);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let service = ExtractorService::new(ServiceConfig::default());
        let err = service.extract(Path::new("image.png")).unwrap_err();
        match err {
            ExtractError::UnsupportedExtension(ext) => assert_eq!(ext, "png"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn require_non_empty_fails_on_blank_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "   \n  ").unwrap();

        let config = ServiceConfig {
            require_non_empty: true,
            ..ServiceConfig::default()
        };
        let err = ExtractorService::new(config).extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyResult));
    }
}
