//! Canonical text for each supported file type.

use std::io::Cursor;

use calamine::{Data, DataType, Reader};
use solver_core::{Error, Result};
use tracing::debug;

use crate::encoding::decode_text;

/// Supported file types, detected from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Json,
    Spreadsheet,
    PlainText,
    Markdown,
}

/// Suffixes accepted standalone or inside an archive.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "json", "xls", "xlsx", "txt", "md"];

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xls" | "xlsx" => Some(Self::Spreadsheet),
            "txt" => Some(Self::PlainText),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Detect file type from a filename. Unknown suffixes are an error.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let ext = extension_of(filename);
        Self::from_extension(&ext).ok_or(Error::UnsupportedFormat(ext))
    }
}

/// Lowercased text after the last `.`; the whole name when there is none.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_lowercase()
}

/// Whether a filename carries one of the accepted suffixes.
pub fn is_accepted(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ACCEPTED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Normalize file bytes to text, dispatching on the filename suffix.
pub fn normalize(bytes: &[u8], filename: &str) -> Result<String> {
    let file_type = FileType::from_filename(filename)?;
    debug!("Normalizing {} ({:?}, {} bytes)", filename, file_type, bytes.len());

    match file_type {
        FileType::Csv | FileType::PlainText | FileType::Markdown => decode_text(bytes),
        FileType::Json => normalize_json(bytes),
        FileType::Spreadsheet => spreadsheet_to_csv(bytes),
    }
}

/// Parse and re-serialize compactly.
fn normalize_json(bytes: &[u8]) -> Result<String> {
    let text = decode_text(bytes)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    Ok(serde_json::to_string(&value)?)
}

/// First sheet as CSV; the first row is the header.
fn spreadsheet_to_csv(bytes: &[u8]) -> Result<String> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet("workbook has no sheets".into()))?
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in range.rows() {
        let fields: Vec<String> = row.iter().map(cell_text).collect();
        writer
            .write_record(&fields)
            .map_err(|e| Error::Spreadsheet(e.to_string()))?;
    }

    let out = writer
        .into_inner()
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;
    String::from_utf8(out).map_err(|e| Error::Spreadsheet(e.to_string()))
}

/// Date-formatted cells print as `YYYY-MM-DD HH:MM:SS`; everything else uses `Display`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    }
}
