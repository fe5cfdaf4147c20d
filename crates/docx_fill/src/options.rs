//! Fill options: part selection, missing-key policy, whitespace handling

use serde::{Deserialize, Serialize};

/// Behavior for placeholders found in the template with no supplied value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Fail at the end of the operation if any placeholder key has no value
    Error,
    /// Leave the placeholder token as-is: `<!key!>`
    Keep,
    /// Replace the token with an empty string
    Blank,
}

impl Default for MissingKeyPolicy {
    fn default() -> Self {
        MissingKeyPolicy::Keep
    }
}

/// Which XML parts inside the DOCX to process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartsSelection {
    /// document.xml + headers/footers (+ optional notes/comments)
    Standard,
    /// Every .xml file directly under word/ except relationship files
    AllXml,
}

impl Default for PartsSelection {
    fn default() -> Self {
        PartsSelection::Standard
    }
}

/// Callback for non-fatal per-part processing problems
pub type WarningSink = Box<dyn Fn(&str) + Send + Sync>;

/// Configuration for one fill invocation
pub struct FillOptions {
    pub include_footnotes: bool,
    pub include_endnotes: bool,
    pub include_comments: bool,
    pub selection: PartsSelection,
    pub missing_key_policy: MissingKeyPolicy,

    /// If a rewritten segment has leading/trailing spaces, multiple spaces,
    /// tabs or newlines, enforce `xml:space="preserve"` on its `<w:t>`.
    /// Cleared again when the text no longer needs it.
    pub preserve_whitespace_when_needed: bool,

    /// Also scan `<w:instrText>` (field instructions). Usually unwanted,
    /// but some templates store placeholders inside fields.
    pub include_field_instruction_text: bool,

    /// Check that the template file exists before processing
    pub validate_template: bool,

    /// Escape `<!` / `!>` inside replacement values so a value can never
    /// introduce a live placeholder token
    pub sanitize_values: bool,

    /// Sink for warnings about skipped parts and cleanup problems
    pub on_warning: Option<WarningSink>,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            include_footnotes: true,
            include_endnotes: true,
            include_comments: true,
            selection: PartsSelection::Standard,
            missing_key_policy: MissingKeyPolicy::Keep,
            preserve_whitespace_when_needed: true,
            include_field_instruction_text: false,
            validate_template: true,
            sanitize_values: true,
            on_warning: None,
        }
    }
}

impl FillOptions {
    pub fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = policy;
        self
    }

    pub fn with_selection(mut self, selection: PartsSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_warning_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_warning = Some(Box::new(sink));
        self
    }

    pub(crate) fn warn(&self, message: &str) {
        if let Some(sink) = &self.on_warning {
            sink(message);
        } else {
            tracing::warn!("{message}");
        }
    }
}

impl std::fmt::Debug for FillOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FillOptions")
            .field("include_footnotes", &self.include_footnotes)
            .field("include_endnotes", &self.include_endnotes)
            .field("include_comments", &self.include_comments)
            .field("selection", &self.selection)
            .field("missing_key_policy", &self.missing_key_policy)
            .field(
                "preserve_whitespace_when_needed",
                &self.preserve_whitespace_when_needed,
            )
            .field(
                "include_field_instruction_text",
                &self.include_field_instruction_text,
            )
            .field("validate_template", &self.validate_template)
            .field("sanitize_values", &self.sanitize_values)
            .field("on_warning", &self.on_warning.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let opts = FillOptions::default();
        assert_eq!(opts.missing_key_policy, MissingKeyPolicy::Keep);
        assert_eq!(opts.selection, PartsSelection::Standard);
        assert!(opts.include_footnotes);
        assert!(opts.sanitize_values);
        assert!(!opts.include_field_instruction_text);
    }

    #[test]
    fn builders_override_fields() {
        let opts = FillOptions::default()
            .with_policy(MissingKeyPolicy::Error)
            .with_selection(PartsSelection::AllXml);
        assert_eq!(opts.missing_key_policy, MissingKeyPolicy::Error);
        assert_eq!(opts.selection, PartsSelection::AllXml);
    }
}
