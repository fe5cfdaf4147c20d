//! Cross-segment placeholder rewriting
//!
//! Placeholders are matched against a paragraph's concatenated text, then
//! mapped back onto the individual text segments through prefix sums of
//! segment lengths. Matches are applied rightmost-first: a splice only ever
//! changes text at or after its own offset, so the still-unapplied matches
//! to its left keep referencing an unmodified prefix of the snapshot.

use crate::options::{FillOptions, MissingKeyPolicy};
use crate::part::{PartDocument, SegmentEdit, SegmentKind, TextSegment};
use crate::placeholder::{find_placeholders, PlaceholderMatch};
use crate::report::PartReport;
use std::collections::HashMap;

/// Rewrite every paragraph of one part. Returns the part's report and
/// whether the document buffer was changed.
pub(crate) fn rewrite_part(
    doc: &mut PartDocument,
    values: &HashMap<String, String>,
    options: &FillOptions,
) -> (PartReport, bool) {
    let mut report = PartReport::default();
    let mut edits: Vec<SegmentEdit> = Vec::new();

    for paragraph in doc.paragraphs() {
        let mut segments = doc.segments(paragraph, options.include_field_instruction_text);
        if segments.is_empty() {
            continue;
        }
        let paragraph_report = rewrite_segments(&mut segments, values, options.missing_key_policy);
        report.merge(paragraph_report);

        for segment in segments.into_iter().filter(|s| s.dirty) {
            edits.push(SegmentEdit {
                preserve: preserve_marking(&segment, options),
                span: segment.span,
                text: segment.text,
            });
        }
    }

    let changed = !edits.is_empty();
    doc.apply_edits(&edits);
    (report, changed)
}

/// Detect and splice placeholders within one paragraph's segments
pub(crate) fn rewrite_segments(
    segments: &mut [TextSegment],
    values: &HashMap<String, String>,
    policy: MissingKeyPolicy,
) -> PartReport {
    let mut report = PartReport::default();

    let full_text: String = segments.iter().map(|s| s.text.as_str()).collect();
    let matches = find_placeholders(&full_text);
    if matches.is_empty() {
        return report;
    }

    let prefix = prefix_sums(segments);

    for m in matches.iter().rev() {
        report.found_keys.insert(m.key.clone());

        let replacement = match values.get(&m.key) {
            Some(value) => {
                report.replaced_keys.insert(m.key.clone());
                value.clone()
            }
            None => {
                report.missing_keys.insert(m.key.clone());
                match policy {
                    // Error is aggregated by the orchestrator at the very end
                    MissingKeyPolicy::Error | MissingKeyPolicy::Keep => continue,
                    MissingKeyPolicy::Blank => String::new(),
                }
            }
        };

        // Unmappable offsets skip this match rather than abort the paragraph
        let (Some(start), Some(end)) = (locate(m.start, &prefix), locate(m.end, &prefix)) else {
            continue;
        };
        splice(segments, start, end, &replacement);
        report.replacements_count += 1;
    }

    report
}

/// `(segment index, local byte offset)` for one global offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SegmentLocation {
    segment: usize,
    offset: usize,
}

fn prefix_sums(segments: &[TextSegment]) -> Vec<usize> {
    let mut sums = Vec::with_capacity(segments.len() + 1);
    sums.push(0);
    for segment in segments {
        sums.push(sums[sums.len() - 1] + segment.text.len());
    }
    sums
}

/// First segment whose span contains the global offset. An offset on a
/// boundary resolves to the earlier segment, matching splice-at-tail.
fn locate(target: usize, prefix: &[usize]) -> Option<SegmentLocation> {
    for i in 0..prefix.len().saturating_sub(1) {
        if target >= prefix[i] && target <= prefix[i + 1] {
            return Some(SegmentLocation {
                segment: i,
                offset: target - prefix[i],
            });
        }
    }
    None
}

/// Replace the span `start..end` with `replacement`. The first segment
/// keeps its prefix plus the replacement, the last keeps its suffix, and
/// every segment strictly between is cleared.
fn splice(
    segments: &mut [TextSegment],
    start: SegmentLocation,
    end: SegmentLocation,
    replacement: &str,
) {
    if start.segment == end.segment {
        let seg = &mut segments[start.segment];
        seg.text.replace_range(start.offset..end.offset, replacement);
        seg.dirty = true;
        return;
    }

    let head: String = segments[start.segment].text[..start.offset].to_string();
    segments[start.segment].text = head + replacement;
    segments[start.segment].dirty = true;

    let tail = segments[end.segment].text[end.offset..].to_string();
    segments[end.segment].text = tail;
    segments[end.segment].dirty = true;

    for seg in &mut segments[start.segment + 1..end.segment] {
        seg.text.clear();
        seg.dirty = true;
    }
}

/// Two-way whitespace-preserve decision for one changed segment
fn preserve_marking(segment: &TextSegment, options: &FillOptions) -> Option<bool> {
    if !options.preserve_whitespace_when_needed || segment.kind != SegmentKind::RunText {
        return None;
    }
    Some(needs_preserve(&segment.text))
}

/// Word collapses this whitespace unless the run is marked preserving
fn needs_preserve(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    text.starts_with(' ')
        || text.ends_with(' ')
        || text.contains("  ")
        || text.contains('\t')
        || text.contains('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> TextSegment {
        TextSegment {
            span: (0, 0),
            kind: SegmentKind::RunText,
            text: text.to_string(),
            dirty: false,
        }
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_segment_exact_match() {
        let mut segments = vec![segment("<!inn!>")];
        let report = rewrite_segments(
            &mut segments,
            &values(&[("inn", "7701234567")]),
            MissingKeyPolicy::Keep,
        );
        assert_eq!(segments[0].text, "7701234567");
        assert_eq!(report.replacements_count, 1);
        assert!(report.replaced_keys.contains("inn"));
    }

    #[test]
    fn cross_segment_match_clears_middle() {
        let mut segments = vec![segment("<!co"), segment("mpany"), segment("_name!>")];
        let report = rewrite_segments(
            &mut segments,
            &values(&[("company_name", "Acme LLC")]),
            MissingKeyPolicy::Keep,
        );
        assert_eq!(segments[0].text, "Acme LLC");
        assert_eq!(segments[1].text, "");
        assert_eq!(segments[2].text, "");
        assert!(report.replaced_keys.contains("company_name"));
        assert_eq!(report.replacements_count, 1);
    }

    #[test]
    fn surrounding_text_survives_cross_segment_splice() {
        let mut segments = vec![segment("INN: <!i"), segment("nn!>, thanks")];
        rewrite_segments(&mut segments, &values(&[("inn", "77")]), MissingKeyPolicy::Keep);
        assert_eq!(segments[0].text, "INN: 77");
        assert_eq!(segments[1].text, ", thanks");
    }

    #[test]
    fn multiple_matches_replace_right_to_left() {
        let mut segments = vec![segment("<!a!> and <!b!> and <!a!>")];
        let report = rewrite_segments(
            &mut segments,
            &values(&[("a", "1"), ("b", "2")]),
            MissingKeyPolicy::Keep,
        );
        assert_eq!(segments[0].text, "1 and 2 and 1");
        assert_eq!(report.replacements_count, 3);
    }

    #[test]
    fn keep_policy_leaves_token_untouched() {
        let mut segments = vec![segment("x <!unknown!> y")];
        let report =
            rewrite_segments(&mut segments, &HashMap::new(), MissingKeyPolicy::Keep);
        assert_eq!(segments[0].text, "x <!unknown!> y");
        assert!(!segments[0].dirty);
        assert!(report.missing_keys.contains("unknown"));
        assert_eq!(report.replacements_count, 0);
    }

    #[test]
    fn blank_policy_deletes_token() {
        let mut segments = vec![segment("x <!unknown!> y")];
        let report =
            rewrite_segments(&mut segments, &HashMap::new(), MissingKeyPolicy::Blank);
        assert_eq!(segments[0].text, "x  y");
        assert!(report.missing_keys.contains("unknown"));
        assert_eq!(report.replacements_count, 1);
    }

    #[test]
    fn error_policy_defers_without_splicing() {
        let mut segments = vec![segment("<!unknown!>")];
        let report =
            rewrite_segments(&mut segments, &HashMap::new(), MissingKeyPolicy::Error);
        assert_eq!(segments[0].text, "<!unknown!>");
        assert!(report.missing_keys.contains("unknown"));
    }

    #[test]
    fn replacement_shorter_and_longer_than_token() {
        let mut segments = vec![segment("[<!k!>]")];
        rewrite_segments(&mut segments, &values(&[("k", "a much longer value")]), MissingKeyPolicy::Keep);
        assert_eq!(segments[0].text, "[a much longer value]");

        let mut segments = vec![segment("[<!key_name!>]")];
        rewrite_segments(&mut segments, &values(&[("key_name", "x")]), MissingKeyPolicy::Keep);
        assert_eq!(segments[0].text, "[x]");
    }

    #[test]
    fn empty_segments_between_runs_are_handled() {
        let mut segments = vec![segment("<!k"), segment(""), segment("ey!>")];
        rewrite_segments(&mut segments, &values(&[("key", "v")]), MissingKeyPolicy::Keep);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "v");
    }

    #[test]
    fn needs_preserve_rules() {
        assert!(needs_preserve(" leading"));
        assert!(needs_preserve("trailing "));
        assert!(needs_preserve("two  spaces"));
        assert!(needs_preserve("tab\there"));
        assert!(needs_preserve("new\nline"));
        assert!(!needs_preserve("plain text"));
        assert!(!needs_preserve(""));
    }

    #[test]
    fn locate_resolves_boundaries_to_earlier_segment() {
        let segments = vec![segment("ab"), segment("cd")];
        let prefix = prefix_sums(&segments);
        assert_eq!(locate(2, &prefix), Some(SegmentLocation { segment: 0, offset: 2 }));
        assert_eq!(locate(4, &prefix), Some(SegmentLocation { segment: 1, offset: 2 }));
        assert_eq!(locate(5, &prefix), None);
    }
}
