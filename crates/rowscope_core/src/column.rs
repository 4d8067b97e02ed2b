//! Column runtime type inference
//!
//! Aggregates the kind of every stored value in a column into one label.
//! Unlike schema types this reflects what is actually in the rows, so a
//! nullable blob column with some data reads `mixed(bytes|null)`.

use serde::{Serialize, Serializer};

use crate::classify::{classify_value, ValueKind};
use crate::value::Row;

/// Observed runtime type of a column across a row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// No row contains the column
    NoData,
    /// Every present value has the same kind
    Uniform(ValueKind),
    /// Distinct kinds in first-seen order (always two or more)
    Mixed(Vec<ValueKind>),
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::NoData => write!(f, "no data"),
            ColumnType::Uniform(kind) => write!(f, "{}", kind),
            ColumnType::Mixed(kinds) => {
                let labels: Vec<&str> = kinds.iter().map(ValueKind::as_str).collect();
                write!(f, "mixed({})", labels.join("|"))
            }
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Infer the runtime type of `column` across `rows`.
///
/// Rows without the key are skipped; a key holding null counts as `null`.
pub fn infer_column_type(rows: &[Row], column: &str) -> ColumnType {
    let mut seen: Vec<ValueKind> = Vec::new();

    for value in rows.iter().filter_map(|row| row.get(column)) {
        let kind = classify_value(value);
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }

    match seen.len() {
        0 => ColumnType::NoData,
        1 => ColumnType::Uniform(seen[0]),
        _ => ColumnType::Mixed(seen),
    }
}
