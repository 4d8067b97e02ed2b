//! Runtime value classification

use serde::Serialize;

use crate::binary::is_byte_sequence;
use crate::value::CellValue;

/// Semantic kind of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    /// Native byte buffer or binary object
    Bytes,
    /// Any other object or array
    Object,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Bytes => "bytes",
            ValueKind::Object => "object",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a runtime value. Total: every value maps to exactly one kind.
pub fn classify_value(value: &CellValue) -> ValueKind {
    match value {
        CellValue::Null => ValueKind::Null,
        CellValue::Undefined => ValueKind::Undefined,
        CellValue::Bool(_) => ValueKind::Boolean,
        CellValue::Number(_) => ValueKind::Number,
        CellValue::String(_) => ValueKind::String,
        CellValue::Bytes(_) => ValueKind::Bytes,
        CellValue::Array(_) | CellValue::Object(_) if is_byte_sequence(value) => ValueKind::Bytes,
        CellValue::Array(_) | CellValue::Object(_) => ValueKind::Object,
    }
}
