//! Runtime cell values
//!
//! Rows come out of the data store as loosely-typed, JSON-like data.
//! `CellValue` keeps every shape the introspection pipeline distinguishes,
//! including native byte buffers (which JSON cannot carry) and the
//! "absent" marker that separates a missing value from an explicit null.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Largest integer magnitude an `f64` represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A materialized row: column name -> value, in column order.
///
/// A key that is absent is not the same as a key holding [`CellValue::Null`].
pub type Row = IndexMap<String, CellValue>;

/// A single runtime value as stored in a row.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum CellValue {
    /// No value at all (the key exists but nothing was stored)
    #[default]
    Undefined,
    /// Explicit null
    Null,
    Bool(bool),
    /// All numbers are doubles, as in the data store's wire format
    Number(f64),
    String(String),
    /// Native byte buffer
    Bytes(Vec<u8>),
    Array(Vec<CellValue>),
    /// Insertion-ordered record
    Object(IndexMap<String, CellValue>),
}

impl CellValue {
    /// Build an object value from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CellValue)>,
    {
        CellValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The value as a byte, if it is an integer in `0..=255`.
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && (0.0..=255.0).contains(n) => {
                Some(*n as u8)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, CellValue::Undefined)
    }
}

/// Render a number the way the data store's display layer does:
/// integral values without a fractional part, `NaN`, `Infinity`, and
/// exponent form at or above `1e21` and below `1e-6`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if is_safe_integer(n) {
        // `as` also folds -0 into 0
        format!("{}", n as i64)
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        format!("{}", n)
    }
}

/// `1e+21`, `-2.5e-7`: shortest mantissa, signed exponent.
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

// ============================================================================
// Conversions
// ============================================================================

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => CellValue::String(s),
            serde_json::Value::Array(items) => {
                CellValue::Array(items.into_iter().map(CellValue::from).collect())
            }
            serde_json::Value::Object(map) => CellValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, CellValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(value: Vec<u8>) -> Self {
        CellValue::Bytes(value)
    }
}

/// Serializes to the store's JSON text form: byte buffers become
/// index-keyed objects, undefined object members are dropped and
/// undefined array items become `null`.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Undefined | CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) if is_safe_integer(*n) => serializer.serialize_i64(*n as i64),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Bytes(bytes) => {
                let mut map = serializer.serialize_map(Some(bytes.len()))?;
                for (index, byte) in bytes.iter().enumerate() {
                    map.serialize_entry(&index.to_string(), byte)?;
                }
                map.end()
            }
            CellValue::Array(items) => serializer.collect_seq(items),
            CellValue::Object(entries) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in entries {
                    if !value.is_undefined() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
        }
    }
}
