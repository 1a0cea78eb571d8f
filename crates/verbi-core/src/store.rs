//! Whole-file loading and atomic saving of verb databases.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::format::{Document, LegacyConvention, VerbDocument};

/// Load and decode a database file.
///
/// Decoding failures keep their [`VerbError`](crate::error::VerbError) as
/// the root cause, so callers can downcast to tell them apart from I/O
/// errors.
pub fn load(path: &Path, convention: &LegacyConvention) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read verb database: {}", path.display()))?;
    let document = Document::from_json_str(&content, convention)
        .with_context(|| format!("failed to load verb database: {}", path.display()))?;

    match &document {
        Document::Legacy(doc) => {
            tracing::debug!(
                path = %path.display(),
                groups = doc.groups().len(),
                verbs = doc.records().len(),
                "loaded legacy database"
            );
            for warning in doc.warnings() {
                tracing::warn!("{}: {warning}", path.display());
            }
        }
        Document::Normalized(doc) => {
            tracing::debug!(path = %path.display(), verbs = doc.len(), "loaded database");
        }
    }

    Ok(document)
}

/// Save a tense-annotated document and mark it clean.
pub fn save(path: &Path, document: &mut VerbDocument) -> Result<()> {
    let json = document
        .to_json_pretty()
        .context("failed to serialize verb database")?;
    write_atomic(path, &json)?;
    document.mark_clean();
    tracing::info!(path = %path.display(), verbs = document.len(), "database saved");
    Ok(())
}

/// Replace `path` with `contents` in one step.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the destination; on failure the previous file is untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
