//! Safe ZIP extraction and repacking
//!
//! A DOCX file is a ZIP archive of XML parts. The template is partially
//! untrusted input, so extraction rejects any entry whose declared path
//! would escape the extraction root (zip-slip).

use crate::error::{FillError, FillResult};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Extract every entry of `archive_path` into `dest_root`.
///
/// Fails with [`FillError::ZipSlip`] on the first entry whose path contains
/// a `..` segment, starts with a separator, or does not stay inside the
/// root after joining. Partial extraction state is cleaned up by the
/// caller's scratch-directory guard.
pub fn extract(archive_path: &Path, dest_root: &Path) -> FillResult<()> {
    let file = File::open(archive_path)
        .map_err(|e| FillError::InvalidArchive(format!("{}: {e}", archive_path.display())))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| FillError::InvalidArchive(e.to_string()))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let raw_name = entry.name().to_string();

        let safe_rel = safe_entry_path(&raw_name).ok_or(FillError::ZipSlip {
            entry: raw_name.clone(),
        })?;
        let out_path = dest_root.join(&safe_rel);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}

/// Normalize one entry path, rejecting traversal and absolute paths.
/// Returns the relative path to extract to, or None if the entry is unsafe.
fn safe_entry_path(raw: &str) -> Option<PathBuf> {
    if raw.starts_with('/') || raw.starts_with('\\') {
        return None;
    }
    // Entry names may use either separator regardless of platform
    let normalized = raw.replace('\\', "/");
    let mut rel = PathBuf::new();
    for part in normalized.split('/').filter(|p| !p.is_empty()) {
        if part == ".." {
            return None;
        }
        if part == "." {
            continue;
        }
        rel.push(part);
    }
    // Joining must not introduce a root or parent component
    match rel.components().next() {
        Some(Component::Normal(_)) => Some(rel),
        _ => None,
    }
}

/// Build a fresh archive at `staging_path` from every regular file under
/// `src_root`, stored at its root-relative path with deflate compression.
/// Walk order is sorted for reproducible archives.
pub fn repack(src_root: &Path, staging_path: &Path) -> FillResult<()> {
    let file = File::create(staging_path)
        .map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut files = Vec::new();
    collect_files(src_root, src_root, &mut files)?;
    files.sort();

    for rel in &files {
        let entry_name = zip_entry_name(rel);
        zip.start_file(entry_name, options)
            .map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
        let data = fs::read(src_root.join(rel))?;
        zip.write_all(&data)
            .map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
    }

    zip.finish()
        .map_err(|e| FillError::CannotCreateOutput(e.to_string()))?;
    Ok(())
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> FillResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            // Directories themselves are not stored; Word does not need them
            out.push(rel.to_path_buf());
        }
    }
    Ok(())
}

/// ZIP entry names always use forward slashes
pub(crate) fn zip_entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
