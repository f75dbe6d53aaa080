//! Turns an uploaded file (or zip of files) into one text blob.
//!
//! Single files are normalized by suffix; zip archives are expanded one level
//! and every eligible member is normalized in archive order. Each entry is
//! preceded by a `--- FILE: <name> ---` marker.

pub mod archive;
pub mod encoding;
pub mod ingest;
pub mod normalize;
pub mod types;

pub use ingest::ingest;
pub use normalize::{normalize, FileType};
pub use types::{ExtractedEntry, UploadedFile};
