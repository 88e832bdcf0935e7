/// Encoding detection and decoding for loading text files.
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;

/// Detects the encoding of raw bytes.
///
/// A byte-order mark wins; otherwise valid UTF-8 is taken as UTF-8 and
/// anything else is handed to `chardetng`.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return encoding_rs::UTF_8;
    }
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decodes raw bytes into a String, stripping any BOM.
///
/// # Errors
///
/// Returns an error if the bytes contain sequences invalid in the detected encoding.
pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    let encoding = detect_encoding(bytes);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        anyhow::bail!("encoding errors while decoding as {}", used.name());
    }
    tracing::debug!("Decoded {} bytes as {}", bytes.len(), used.name());
    Ok(decoded.into_owned())
}

/// Normalizes line endings to `\n` (LF).
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Reads a text file from disk, detecting its encoding and normalizing line endings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    let raw_text =
        decode_bytes(&bytes).with_context(|| format!("failed to decode file: {}", path.display()))?;
    Ok(normalize_line_endings(&raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_plain_utf8() {
        assert_eq!(detect_encoding("héllo".as_bytes()), encoding_rs::UTF_8);
        assert_eq!(detect_encoding(b"hello"), encoding_rs::UTF_8);
    }

    #[test]
    fn test_detect_boms() {
        assert_eq!(detect_encoding(&[0xEF, 0xBB, 0xBF, b'a']), encoding_rs::UTF_8);
        assert_eq!(detect_encoding(&[0xFF, 0xFE, b'a', 0]), encoding_rs::UTF_16LE);
        assert_eq!(detect_encoding(&[0xFE, 0xFF, 0, b'a']), encoding_rs::UTF_16BE);
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"def f():\n");
        assert_eq!(decode_bytes(&bytes).unwrap(), "def f():\n");
    }

    #[test]
    fn test_decode_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "pass".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_bytes(&bytes).unwrap(), "pass");
    }

    #[test]
    fn test_decode_legacy_single_byte() {
        let bytes: Vec<u8> = "Le caf\u{e9} \u{e9}tait tr\u{e8}s agr\u{e9}able, d\u{e9}j\u{e0} vu."
            .chars()
            .map(|c| c as u32 as u8)
            .collect();
        assert!(std::str::from_utf8(&bytes).is_err());
        let text = decode_bytes(&bytes).unwrap();
        assert!(text.contains("caf"));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_load_text_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.py");
        std::fs::write(&path, "class A:\r\n    pass\r\n").unwrap();
        assert_eq!(load_text(&path).unwrap(), "class A:\n    pass\n");
    }

    #[test]
    fn test_load_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(&dir.path().join("missing.py")).unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
