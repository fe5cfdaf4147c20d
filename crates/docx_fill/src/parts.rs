//! Part selection within the extracted archive tree
//!
//! A DOCX archive keeps its editable text in a handful of XML parts:
//! `word/document.xml` (main body), `word/headerN.xml` / `word/footerN.xml`,
//! and optionally footnotes, endnotes and comments.

use crate::error::{FillError, FillResult};
use crate::options::{FillOptions, PartsSelection};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main document part, always required
pub const MAIN_DOCUMENT: &str = "word/document.xml";

const WORD_DIR: &str = "word";
const FOOTNOTES: &str = "word/footnotes.xml";
const ENDNOTES: &str = "word/endnotes.xml";
const COMMENTS: &str = "word/comments.xml";

/// Select the parts to process, as paths relative to the extracted root.
///
/// Ordering is lexicographic in both strategies so reports and output
/// diffs are reproducible. Fails when `word/document.xml` is absent.
pub fn select_parts(root: &Path, options: &FillOptions) -> FillResult<Vec<PathBuf>> {
    if !root.join(MAIN_DOCUMENT).is_file() {
        return Err(FillError::MissingMainDocument);
    }

    // BTreeSet gives dedup + lexicographic order in one go
    let mut parts: BTreeSet<PathBuf> = BTreeSet::new();
    parts.insert(PathBuf::from(MAIN_DOCUMENT));

    match options.selection {
        PartsSelection::Standard => {
            parts.extend(list_parts(root, "header", ".xml")?);
            parts.extend(list_parts(root, "footer", ".xml")?);
            for (flag, path) in [
                (options.include_footnotes, FOOTNOTES),
                (options.include_endnotes, ENDNOTES),
                (options.include_comments, COMMENTS),
            ] {
                if flag && root.join(path).is_file() {
                    parts.insert(PathBuf::from(path));
                }
            }
        }
        PartsSelection::AllXml => {
            let word_dir = root.join(WORD_DIR);
            if word_dir.is_dir() {
                for entry in fs::read_dir(&word_dir)? {
                    let entry = entry?;
                    if !entry.file_type()?.is_file() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.to_lowercase().ends_with(".xml") && !name.ends_with(".rels") {
                        parts.insert(Path::new(WORD_DIR).join(&name));
                    }
                }
            }
        }
    }

    Ok(parts.into_iter().collect())
}

/// Files in word/ matching `<prefix>*<suffix>`, as root-relative paths
fn list_parts(root: &Path, prefix: &str, suffix: &str) -> FillResult<Vec<PathBuf>> {
    let dir = root.join(WORD_DIR);
    let mut found = Vec::new();
    if !dir.is_dir() {
        return Ok(found);
    }
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(prefix) && name.ends_with(suffix) {
            found.push(Path::new(WORD_DIR).join(&name));
        }
    }
    found.sort();
    Ok(found)
}
