//! Ingestion entry point: optional upload → one text blob.

use solver_core::Result;
use tracing::info;

use crate::archive::{expand_archive, is_container};
use crate::normalize::normalize;
use crate::types::{ExtractedEntry, UploadedFile};

/// Ingest an optional upload into the text embedded in the prompt.
///
/// No upload yields an empty string. Any failure aborts the whole ingestion;
/// partial text is never returned.
pub fn ingest(upload: Option<&UploadedFile>) -> Result<String> {
    let Some(file) = upload else {
        return Ok(String::new());
    };

    let entries = extract_entries(file)?;
    let text = render_entries(&entries);
    info!(
        "Ingested {} ({} entries, {} chars)",
        file.filename,
        entries.len(),
        text.len()
    );
    Ok(text)
}

/// Split an upload into normalized entries.
pub fn extract_entries(file: &UploadedFile) -> Result<Vec<ExtractedEntry>> {
    let filename = file.filename.to_lowercase();

    if is_container(&filename) {
        return expand_archive(&file.bytes);
    }

    let text = normalize(&file.bytes, &filename)?;
    Ok(vec![ExtractedEntry {
        source: filename,
        text,
    }])
}

/// Concatenate entries, each under its source marker.
pub fn render_entries(entries: &[ExtractedEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.header());
        out.push_str(&entry.text);
    }
    out
}
