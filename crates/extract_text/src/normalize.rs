//! Text normalization
//!
//! Extracted text arrives with mixed line endings, non-breaking spaces and
//! arbitrary runs of blank lines; downstream consumers also cap input size.
//! Oversized text is truncated keeping 65% head and 35% tail around an
//! explicit marker, so both the opening and the closing of a document
//! survive.

const TRUNCATION_MARKER: &str = "\n\n...[TRUNCATED]...\n\n";
const HEAD_SHARE: f64 = 0.65;
const MAX_BLANK_LINES: usize = 2;

/// Normalize extracted text and cap it at `max_chars` characters
pub fn normalize(text: &str, max_chars: usize) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{00A0}', " ");

    let collapsed = collapse_blank_lines(&unified, MAX_BLANK_LINES);
    let trimmed = collapsed.trim();

    let total = trimmed.chars().count();
    if total <= max_chars {
        return trimmed.to_string();
    }

    let head_count = (max_chars as f64 * HEAD_SHARE) as usize;
    let tail_count = max_chars - head_count;

    let head: String = trimmed.chars().take(head_count).collect();
    let tail: String = trimmed
        .chars()
        .skip(total.saturating_sub(tail_count))
        .collect();
    format!("{head}{TRUNCATION_MARKER}{tail}")
}

fn collapse_blank_lines(text: &str, max_consecutive: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blanks = 0usize;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks <= max_consecutive {
                result.push('\n');
            }
        } else {
            blanks = 0;
            result.push_str(line);
            result.push('\n');
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_line_endings_and_nbsp() {
        assert_eq!(normalize("a\r\nb\rc\u{00A0}d", 100), "a\nb\nc d");
    }

    #[test]
    fn collapses_runs_of_blank_lines() {
        let out = normalize("a\n\n\n\n\nb", 100);
        assert_eq!(out, "a\n\n\nb");
    }

    #[test]
    fn short_text_is_untouched_apart_from_trim() {
        assert_eq!(normalize("  hello  ", 100), "hello");
    }

    #[test]
    fn long_text_keeps_head_and_tail() {
        let text: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let out = normalize(&text, 100);
        assert!(out.contains("...[TRUNCATED]..."));
        assert!(out.starts_with(&text[..65]));
        assert!(out.ends_with(&text[text.len() - 35..]));
    }
}
