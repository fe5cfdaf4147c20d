//! Fill orchestration
//!
//! `fill` drives the whole pipeline: validate → sanitize values → extract
//! into a scratch tree → select parts → rewrite each part → aggregate the
//! report → enforce the missing-key policy → repack. The scratch tree is a
//! [`tempfile::TempDir`] and is removed on every exit path.

use crate::archive;
use crate::error::{FillError, FillResult};
use crate::options::{FillOptions, MissingKeyPolicy};
use crate::part::PartDocument;
use crate::parts;
use crate::placeholder;
use crate::report::{FillReport, PartReport};
use crate::rewrite::rewrite_part;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Replace placeholders like `<!company_name!>` in a DOCX template and
/// write the result to `output`. Returns a report of found, replaced and
/// missing keys.
///
/// The missing-key check under [`MissingKeyPolicy::Error`] runs once,
/// after all parts are processed and before the output archive is written:
/// on that failure no output file is created.
pub fn fill(
    template: &Path,
    output: &Path,
    values: &HashMap<String, String>,
    options: &FillOptions,
) -> FillResult<FillReport> {
    run(template, Some(output), values, options)
}

/// Dry run: the same pipeline over the same parts, but nothing is written
/// and the missing-key policy is never enforced. Useful as a pre-flight
/// inventory of the template's placeholders.
pub fn scan(template: &Path, options: &FillOptions) -> FillResult<FillReport> {
    run(template, None, &HashMap::new(), options)
}

fn run(
    template: &Path,
    output: Option<&Path>,
    values: &HashMap<String, String>,
    options: &FillOptions,
) -> FillResult<FillReport> {
    if options.validate_template && !template.is_file() {
        return Err(FillError::TemplateNotFound(template.to_path_buf()));
    }

    let values = if options.sanitize_values {
        placeholder::sanitize_values(values)
    } else {
        values.clone()
    };

    // Exclusively owned scratch area, deleted on drop on success and error
    let scratch = tempfile::Builder::new()
        .prefix("docxfill-")
        .tempdir()?;
    let tree = scratch.path().join("tree");
    fs::create_dir_all(&tree)?;

    archive::extract(template, &tree)?;
    let part_paths = parts::select_parts(&tree, options)?;
    tracing::debug!(parts = part_paths.len(), "selected template parts");

    let mut report = FillReport::default();
    for rel in &part_paths {
        let rel_name = archive::zip_entry_name(rel);
        match process_part(&tree.join(rel), &rel_name, &values, options, output.is_some()) {
            Ok((part_report, changed)) => {
                report.absorb(&rel_name, part_report, changed);
            }
            Err(err) => {
                // One damaged header must not block filling the main body
                options.warn(&format!("Failed to process {rel_name}: {err}"));
            }
        }
    }

    if output.is_some()
        && options.missing_key_policy == MissingKeyPolicy::Error
        && !report.missing_keys.is_empty()
    {
        return Err(FillError::MissingKeys(report.missing_keys_sorted()));
    }

    if let Some(output) = output {
        let staging = scratch.path().join("output.docx");
        archive::repack(&tree, &staging)?;
        if output.is_file() {
            fs::remove_file(output)
                .map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
        }
        fs::copy(&staging, output).map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
        tracing::info!(
            output = %output.display(),
            replacements = report.replacements_count,
            "template filled"
        );
    }

    Ok(report)
}

/// Rewrite one part on disk. Parse and serialize failures bubble up as
/// strings; the caller degrades them to warnings and skips the part.
fn process_part(
    path: &Path,
    rel_name: &str,
    values: &HashMap<String, String>,
    options: &FillOptions,
    write: bool,
) -> Result<(PartReport, bool), String> {
    let xml = fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    let mut doc = PartDocument::parse(&xml).map_err(|e| format!("XML parse failed: {e}"))?;

    let (report, changed) = rewrite_part(&mut doc, values, options);

    if changed && write {
        let bytes = doc
            .serialize()
            .map_err(|e| format!("XML serialize failed: {e}"))?;
        fs::write(path, bytes).map_err(|e| format!("write failed: {e}"))?;
        tracing::debug!(part = rel_name, "part rewritten");
    }

    Ok((report, changed))
}
