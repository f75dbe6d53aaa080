//! Error types for the ingestion tier.
//!
//! Any of these aborts a request before a completion call is made.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to decode with utf-8, utf-16, or cp1252")]
    Decode,

    #[error("Unsupported file type: .{0}")]
    UnsupportedFormat(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

pub type Result<T> = std::result::Result<T, Error>;
