//! Placeholder token grammar
//!
//! Tokens look like `<!company_name!>`: literal `<!`, one or more
//! characters from `[A-Za-z0-9_]`, literal `!>`. Case-sensitive, no
//! nesting, no escape mechanism — which is why replacement values are
//! sanitized before substitution (see [`sanitize_value`]).

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A token found in a paragraph's concatenated text: key plus half-open
/// byte range. Valid only against the text snapshot it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderMatch {
    pub key: String,
    pub start: usize,
    pub end: usize,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<!([A-Za-z0-9_]+)!>").expect("token pattern is valid"))
}

/// All tokens in `text`, leftmost-first, non-overlapping, ascending offset
pub(crate) fn find_placeholders(text: &str) -> Vec<PlaceholderMatch> {
    token_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?;
            Some(PlaceholderMatch {
                key: key.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Escape placeholder delimiters inside a replacement value so the value
/// can never read back as a live token
pub(crate) fn sanitize_value(value: &str) -> String {
    value.replace("<!", "&lt;!").replace("!>", "!&gt;")
}

pub(crate) fn sanitize_values(values: &HashMap<String, String>) -> HashMap<String, String> {
    values
        .iter()
        .map(|(k, v)| (k.clone(), sanitize_value(v)))
        .collect()
}
