//! Byte-to-text decoding with a fixed fallback order.
//!
//! Candidates are tried in order: UTF-8, UTF-16, Windows-1252. The first one
//! that decodes without error wins. There is no detection beyond that, so bytes
//! that happen to be valid under an earlier candidate are decoded with it even
//! when they were written in a later one.

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use solver_core::{Error, Result};
use tracing::debug;

/// Bytes with no mapping in code page 1252.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// A candidate text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Windows1252,
}

/// Trial order used by [`decode_text`].
pub const CANDIDATES: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Utf16,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    /// Strict decode: `None` if any byte sequence is malformed.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            Self::Utf16 => decode_utf16(bytes),
            Self::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|s| s.into_owned())
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Windows1252 => "cp1252",
        }
    }
}

/// BOM picks the byte order and is dropped; little-endian otherwise.
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (encoding, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
        [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
        _ => (UTF_16LE, bytes),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|s| s.into_owned())
}

/// Decode bytes with the first candidate that accepts them.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    for candidate in CANDIDATES {
        if let Some(text) = candidate.decode(bytes) {
            debug!("Decoded {} bytes as {}", bytes.len(), candidate.name());
            return Ok(text);
        }
    }
    Err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_first() {
        assert_eq!(decode_text("héllo wörld".as_bytes()).unwrap(), "héllo wörld");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_text(b"").unwrap(), "");
    }

    #[test]
    fn test_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a,b\n1,2".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert!(TextEncoding::Utf8.decode(&bytes).is_none());
        assert_eq!(decode_text(&bytes).unwrap(), "a,b\n1,2");
    }

    #[test]
    fn test_utf16_big_endian_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "hé".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(TextEncoding::Utf16.decode(&bytes).unwrap(), "hé");
    }

    #[test]
    fn test_cp1252_fallback() {
        // Odd length rules out UTF-16; 0xE9 followed by ASCII is invalid UTF-8.
        let bytes = b"caf\xe9!";
        assert!(TextEncoding::Utf8.decode(bytes).is_none());
        assert!(TextEncoding::Utf16.decode(bytes).is_none());
        assert_eq!(decode_text(bytes).unwrap(), "café!");
    }

    #[test]
    fn test_cp1252_smart_quotes() {
        let bytes = b"\x93quoted\x94 text";
        assert_eq!(decode_text(bytes).unwrap(), "\u{201C}quoted\u{201D} text");
    }

    #[test]
    fn test_all_candidates_fail() {
        let bytes = b"ab\x81";
        assert!(TextEncoding::Utf8.decode(bytes).is_none());
        assert!(TextEncoding::Utf16.decode(bytes).is_none());
        assert!(TextEncoding::Windows1252.decode(bytes).is_none());
        assert!(matches!(decode_text(bytes), Err(Error::Decode)));
    }

    #[test]
    fn test_even_length_legacy_bytes_decode_as_utf16() {
        // Known limitation: valid UTF-16 wins over the intended code page.
        let text = decode_text(b"caf\xe9").unwrap();
        assert_ne!(text, "café");
    }
}
