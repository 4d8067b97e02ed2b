//! Properties of byte sequences across their two wire forms.

use proptest::prelude::*;
use rowscope_core::{
    classify_value, decode_hex, encode_hex_preview, format_cell, CellValue, ValueKind,
    HEX_PREVIEW_BYTES,
};

/// Index-keyed object form of `bytes`, keys inserted in reverse.
fn binary_object(bytes: &[u8]) -> CellValue {
    CellValue::object(
        bytes
            .iter()
            .enumerate()
            .rev()
            .map(|(index, byte)| (index.to_string(), CellValue::Number(f64::from(*byte)))),
    )
}

/// Strip the ` (<n> B)` suffix and `0x` marker from a preview.
fn preview_digits(preview: &str) -> &str {
    let digits = preview.split(' ').next().unwrap_or_default();
    digits.trim_start_matches("0x")
}

proptest! {
    #[test]
    fn prop_short_previews_decode_back(bytes in prop::collection::vec(any::<u8>(), 0..=HEX_PREVIEW_BYTES)) {
        let preview = encode_hex_preview(&bytes);
        prop_assert_eq!(decode_hex(preview_digits(&preview)).unwrap(), bytes);
    }

    #[test]
    fn prop_preview_reports_full_length(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let preview = format_cell(&CellValue::Bytes(bytes.clone()));
        let suffix = format!(" ({} B)", bytes.len());
        prop_assert!(preview.ends_with(&suffix));
        let shown = bytes.len().min(HEX_PREVIEW_BYTES);
        prop_assert_eq!(preview_digits(&preview).len(), shown * 2);
    }

    #[test]
    fn prop_native_and_object_forms_format_identically(bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let native = CellValue::Bytes(bytes.clone());
        let object = binary_object(&bytes);
        prop_assert_eq!(format_cell(&native), format_cell(&object));
        prop_assert_eq!(classify_value(&object), ValueKind::Bytes);
    }

    #[test]
    fn prop_decode_accepts_lowercase_and_spacing(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let spaced: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        let text = format!(" 0x{} ", spaced.join(" "));
        prop_assert_eq!(decode_hex(&text).unwrap(), bytes);
    }
}

#[test]
fn test_classification_is_total() {
    let samples = [
        (CellValue::Null, ValueKind::Null),
        (CellValue::Undefined, ValueKind::Undefined),
        (CellValue::from("s"), ValueKind::String),
        (CellValue::Number(1.0), ValueKind::Number),
        (CellValue::Bool(false), ValueKind::Boolean),
        (CellValue::Array(vec![CellValue::from("x")]), ValueKind::Object),
        (CellValue::object([("a", CellValue::Null)]), ValueKind::Object),
        (CellValue::Bytes(vec![0]), ValueKind::Bytes),
    ];
    for (value, expected) in samples {
        assert_eq!(classify_value(&value), expected, "value {:?}", value);
    }
}
