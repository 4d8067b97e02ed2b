//! Snapshot loading
//!
//! A snapshot is a JSON file holding named descriptor types plus, per
//! table, its column descriptors and rows:
//!
//! ```json
//! { "types": { "Name": <descriptor> },
//!   "tables": { "todo": { "columns": { "title": <descriptor> }, "rows": [] } } }
//! ```

use crate::cli::error::HelpfulError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use rowscope_core::{Columns, Row, TypeGraph};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    types: Map<String, JsonValue>,
    #[serde(default)]
    tables: IndexMap<String, TableFile>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    columns: Map<String, JsonValue>,
    #[serde(default)]
    rows: Vec<Row>,
}

/// One table of a loaded snapshot.
#[derive(Debug)]
pub struct SnapshotTable {
    pub columns: Columns,
    pub rows: Vec<Row>,
}

impl SnapshotTable {
    /// Schema columns, then keys only seen in rows, in first-seen order.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        for row in &self.rows {
            for key in row.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }
        names
    }
}

/// Descriptor graph plus tables in file order.
#[derive(Debug)]
pub struct Snapshot {
    pub graph: TypeGraph,
    pub tables: IndexMap<String, SnapshotTable>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HelpfulError::snapshot_not_found(path).into());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        Self::from_json(&text).map_err(|err| HelpfulError::invalid_snapshot(path, format!("{:#}", err)).into())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(text)?;

        let mut graph = TypeGraph::new();
        let named = graph
            .intern_named(&file.types)
            .context("Failed to load named types")?;

        let mut tables = IndexMap::with_capacity(file.tables.len());
        for (name, table) in file.tables {
            let columns = graph
                .intern_columns(&table.columns, &named)
                .with_context(|| format!("Failed to load columns of table {}", name))?;
            tables.insert(
                name,
                SnapshotTable {
                    columns,
                    rows: table.rows,
                },
            );
        }

        debug!(
            types = named.len(),
            tables = tables.len(),
            nodes = graph.len(),
            "loaded snapshot"
        );
        Ok(Self { graph, tables })
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn table(&self, name: &str) -> Result<&SnapshotTable> {
        self.tables
            .get(name)
            .ok_or_else(|| HelpfulError::unknown_table(name, &self.table_names()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowscope_core::format_schema_type;

    const SNAPSHOT: &str = r#"{
        "types": {
            "TodoId": {"name": "Brand", "brand": "TodoId", "parentType": {"name": "String"}}
        },
        "tables": {
            "todo": {
                "columns": {"id": {"$ref": "TodoId"}, "title": {"name": "String"}},
                "rows": [{"id": "t1", "title": "Buy milk", "note": "x"}]
            },
            "empty": {}
        }
    }"#;

    #[test]
    fn test_loads_tables_in_file_order() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.table_names(), vec!["todo", "empty"]);

        let todo = snapshot.table("todo").unwrap();
        assert_eq!(todo.rows.len(), 1);
        assert_eq!(format_schema_type(&snapshot.graph, todo.columns["id"]), "TodoId<String>");
        assert_eq!(todo.column_names(), vec!["id", "title", "note"]);

        let empty = snapshot.table("empty").unwrap();
        assert!(empty.columns.is_empty());
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn test_unknown_table() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
        let err = snapshot.table("todos").unwrap_err();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert_eq!(helpful.message, "Unknown table: todos");
    }

    #[test]
    fn test_rejects_unknown_reference() {
        let text = r#"{"tables": {"todo": {"columns": {"id": {"$ref": "Missing"}}}}}"#;
        let err = Snapshot::from_json(text).unwrap_err();
        assert!(format!("{:#}", err).contains("Missing"));
    }

    #[test]
    fn test_missing_file() {
        let err = Snapshot::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.downcast_ref::<HelpfulError>().is_some());
    }
}
