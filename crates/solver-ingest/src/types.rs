//! Request-scoped ingestion data.

/// A file received with a question. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Normalized text of one source (a standalone upload or an archive member).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Upload filename or in-archive path.
    pub source: String,
    pub text: String,
}

impl ExtractedEntry {
    /// Marker line written before each entry in the aggregate text.
    pub fn header(&self) -> String {
        format!("\n\n--- FILE: {} ---\n\n", self.source)
    }
}
