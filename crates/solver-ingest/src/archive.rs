//! Zip expansion: one level deep, eligible members only.

use std::io::{Cursor, Read};

use solver_core::{Error, Result};
use tracing::{debug, info};

use crate::normalize::{is_accepted, normalize};
use crate::types::ExtractedEntry;

/// Suffix that marks an upload as a container.
pub const CONTAINER_EXTENSION: &str = ".zip";

/// Maximum decompressed bytes read from a single member (zip-bomb protection).
const MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// Whether a filename names a container.
pub fn is_container(filename: &str) -> bool {
    filename.to_lowercase().ends_with(CONTAINER_EXTENSION)
}

/// Normalize every eligible member, in the archive's own listing order.
///
/// Members with other suffixes, directories and nested archives are skipped.
pub fn expand_archive(bytes: &[u8]) -> Result<Vec<ExtractedEntry>> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::Archive(e.to_string()))?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for i in 0..archive.len() {
        let member = archive
            .by_index(i)
            .map_err(|e| Error::Archive(e.to_string()))?;
        let name = member.name().to_string();

        if member.is_dir() || !is_accepted(&name) {
            debug!("Skipping archive member {}", name);
            skipped += 1;
            continue;
        }

        let content = read_bounded(member, &name, MAX_ENTRY_BYTES)?;
        let text = normalize(&content, &name)?;
        entries.push(ExtractedEntry { source: name, text });
    }

    info!(
        "Expanded archive: {} members ingested, {} skipped",
        entries.len(),
        skipped
    );
    Ok(entries)
}

/// Read a member fully, failing if it holds more than `limit` bytes.
fn read_bounded<R: Read>(reader: R, name: &str, limit: u64) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut content)
        .map_err(|e| Error::Archive(format!("{}: {}", name, e)))?;
    if content.len() as u64 > limit {
        return Err(Error::Archive(format!(
            "member {} exceeds size limit ({} bytes)",
            name, limit
        )));
    }
    Ok(content)
}
