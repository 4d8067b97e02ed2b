//! Cell display formatting

use crate::binary::byte_sequence;
use crate::hex_codec::encode_hex_preview;
use crate::value::{format_number, CellValue};

/// Render a cell value for display.
///
/// Byte sequences render as a hex preview whichever form they arrive in,
/// so the same bytes always produce the same text. Other objects render as
/// compact JSON in key insertion order.
pub fn format_cell(value: &CellValue) -> String {
    if let Some(bytes) = byte_sequence(value) {
        return encode_hex_preview(&bytes);
    }

    match value {
        CellValue::Null => "null".to_string(),
        CellValue::Undefined => String::new(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Number(n) => format_number(*n),
        CellValue::String(s) => s.clone(),
        // Serializing a CellValue has no failure path (string keys only)
        CellValue::Bytes(_) | CellValue::Array(_) | CellValue::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}
