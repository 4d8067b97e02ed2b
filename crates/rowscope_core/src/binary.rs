//! Byte sequence detection
//!
//! Binary columns reach us in two shapes: a native byte buffer, or (after
//! a trip through JSON) an object whose keys are the indices `"0".."n-1"`
//! and whose values are the bytes. Both shapes must be treated the same by
//! the formatter and the classifier, so they share this detector.

use std::borrow::Cow;

use crate::value::CellValue;

/// Returns true if `value` is the index-keyed object form of a byte sequence.
///
/// Every entry needs a non-negative integer key and an integer value in
/// `0..=255`. Empty objects are rejected since they are indistinguishable
/// from an empty record. Arrays are keyed by their indices, so a non-empty
/// array of small integers is accepted as well.
pub fn is_binary_object(value: &CellValue) -> bool {
    match value {
        CellValue::Object(entries) => {
            !entries.is_empty()
                && entries
                    .iter()
                    .all(|(key, entry)| index_key(key).is_some() && entry.as_byte().is_some())
        }
        CellValue::Array(items) => {
            !items.is_empty() && items.iter().all(|item| item.as_byte().is_some())
        }
        _ => false,
    }
}

/// Extract the bytes of `value` if it is a byte sequence in either form.
///
/// The object form is reordered by ascending numeric key, so `{1: b, 0: a}`
/// yields `[a, b]`.
pub fn byte_sequence(value: &CellValue) -> Option<Cow<'_, [u8]>> {
    match value {
        CellValue::Bytes(bytes) => Some(Cow::Borrowed(bytes.as_slice())),
        CellValue::Array(items) if is_binary_object(value) => {
            Some(Cow::Owned(items.iter().filter_map(CellValue::as_byte).collect()))
        }
        CellValue::Object(entries) if is_binary_object(value) => {
            let mut indexed: Vec<(u64, u8)> = entries
                .iter()
                .filter_map(|(key, entry)| Some((index_key(key)?, entry.as_byte()?)))
                .collect();
            indexed.sort_by_key(|(index, _)| *index);
            Some(Cow::Owned(indexed.into_iter().map(|(_, byte)| byte).collect()))
        }
        _ => None,
    }
}

/// Returns true for native byte buffers and binary objects alike.
pub fn is_byte_sequence(value: &CellValue) -> bool {
    matches!(value, CellValue::Bytes(_)) || is_binary_object(value)
}

fn index_key(key: &str) -> Option<u64> {
    key.parse::<u64>().ok()
}
