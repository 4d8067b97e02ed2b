//! Hex codec for byte sequences
//!
//! Encoding is a display preview (capped at [`HEX_PREVIEW_BYTES`] bytes, but
//! always reporting the true length). Decoding parses user input for hex
//! form fields and is all-or-nothing.

use thiserror::Error;

/// Number of leading bytes shown in a hex preview.
pub const HEX_PREVIEW_BYTES: usize = 10;

/// Malformed hex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("odd-length hex")]
    OddLength,

    #[error("invalid hex digit {pair:?} at offset {offset}")]
    InvalidDigit {
        /// Character offset of the offending pair in the cleaned input
        offset: usize,
        /// The two characters that failed to parse
        pair: String,
    },
}

/// Render `bytes` as `0x<HEX> (<n> B)`.
///
/// Only the first [`HEX_PREVIEW_BYTES`] bytes are rendered; `n` is always the
/// full length.
pub fn encode_hex_preview(bytes: &[u8]) -> String {
    let shown = &bytes[..bytes.len().min(HEX_PREVIEW_BYTES)];
    format!("0x{} ({} B)", hex::encode_upper(shown), bytes.len())
}

/// Parse hex text into bytes.
///
/// Surrounding whitespace, a leading `0x`/`0X` and any inner whitespace are
/// ignored. Empty input decodes to an empty sequence.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = text.trim();
    let without_marker = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = without_marker
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    if !cleaned.is_ascii() {
        if let Some(err) = non_ascii_error(&cleaned) {
            return Err(err);
        }
    }

    hex::decode(&cleaned).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            let offset = index - index % 2;
            let end = (offset + 2).min(cleaned.len());
            HexError::InvalidDigit {
                offset,
                pair: String::from_utf8_lossy(&cleaned.as_bytes()[offset..end]).into_owned(),
            }
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            HexError::OddLength
        }
    })
}

/// Length and offsets counted in characters, so a multi-byte character is
/// one bad digit rather than a length problem.
fn non_ascii_error(cleaned: &str) -> Option<HexError> {
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() % 2 == 1 {
        return Some(HexError::OddLength);
    }
    let index = chars.iter().position(|ch| !ch.is_ascii_hexdigit())?;
    let offset = index - index % 2;
    Some(HexError::InvalidDigit {
        offset,
        pair: chars[offset..offset + 2].iter().collect(),
    })
}
