//! Form input parsing
//!
//! Converts what a user typed (or ticked) into the value stored for that
//! field. Failures name the offending field so a form can point at it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::fields::{FieldKind, InsertField};
use crate::hex_codec::{decode_hex, HexError};
use crate::value::{CellValue, Row};

static NUMERIC_LOOKING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid")
});

/// Raw form input: text boxes and selects give text, checkboxes a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Text(String),
    Flag(bool),
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Text(value)
    }
}

impl From<bool> for RawInput {
    fn from(value: bool) -> Self {
        RawInput::Flag(value)
    }
}

impl RawInput {
    fn is_checked(&self) -> bool {
        match self {
            RawInput::Flag(flag) => *flag,
            RawInput::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true")
                    || text.eq_ignore_ascii_case("on")
                    || text == "1"
            }
        }
    }

    fn text(&self) -> &str {
        match self {
            RawInput::Text(text) => text.trim(),
            RawInput::Flag(true) => "true",
            RawInput::Flag(false) => "false",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsertError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: String, value: String },

    #[error("{field}: {source}")]
    Hex {
        field: String,
        #[source]
        source: HexError,
    },
}

impl InsertError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            InsertError::Required { field }
            | InsertError::NotANumber { field, .. }
            | InsertError::Hex { field, .. } => field,
        }
    }
}

/// Parse one raw input into the value stored for `field`.
pub fn parse_insert_value(field: &InsertField, raw: &RawInput) -> Result<CellValue, InsertError> {
    if field.kind == FieldKind::Checkbox {
        let stored = if raw.is_checked() { 1.0 } else { 0.0 };
        return Ok(CellValue::Number(stored));
    }

    let text = raw.text();
    if text.is_empty() {
        if field.required {
            return Err(InsertError::Required {
                field: field.name.clone(),
            });
        }
        return Ok(CellValue::Null);
    }

    match field.kind {
        FieldKind::Number => parse_number(text)
            .map(CellValue::Number)
            .ok_or_else(|| InsertError::NotANumber {
                field: field.name.clone(),
                value: text.to_string(),
            }),
        FieldKind::Hex => decode_hex(text)
            .map(CellValue::Bytes)
            .map_err(|source| InsertError::Hex {
                field: field.name.clone(),
                source,
            }),
        FieldKind::Select if has_numeric_options(field) && is_numeric_looking(text) => {
            Ok(parse_number(text).map_or_else(|| CellValue::from(text), CellValue::Number))
        }
        FieldKind::Select | FieldKind::Text | FieldKind::Checkbox => Ok(CellValue::from(text)),
    }
}

/// Parse every field of a form into a row, in field order.
///
/// Missing inputs count as empty text (or an unticked checkbox). The first
/// failing field aborts the whole row.
pub fn build_insert_row(
    fields: &[InsertField],
    inputs: &HashMap<String, RawInput>,
) -> Result<Row, InsertError> {
    let empty = RawInput::Text(String::new());
    let unchecked = RawInput::Flag(false);

    fields
        .iter()
        .map(|field| {
            let fallback = if field.kind == FieldKind::Checkbox {
                &unchecked
            } else {
                &empty
            };
            let raw = inputs.get(&field.name).unwrap_or(fallback);
            Ok((field.name.clone(), parse_insert_value(field, raw)?))
        })
        .collect()
}

/// Literal selects over numbers (e.g. a `0 | 1` flag) store numbers.
fn has_numeric_options(field: &InsertField) -> bool {
    field.reference_table.is_none()
        && !field.options.is_empty()
        && field.options.iter().all(|option| is_numeric_looking(option))
}

fn is_numeric_looking(text: &str) -> bool {
    NUMERIC_LOOKING.is_match(text)
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
