//! fields command - the insert form derived for a table

use crate::cli::config::RowscopeConfig;
use crate::cli::output::{join_or_dash, print_json, print_table};
use crate::cli::snapshot::{Snapshot, SnapshotTable};
use anyhow::Result;
use rowscope_core::{derive_insert_fields_with_identity, InsertField, TypeGraph};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct FieldsArgs {
    pub snapshot: PathBuf,
    pub table: String,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FieldsOutput<'a> {
    table: &'a str,
    fields: Vec<InsertField>,
}

pub fn run(args: FieldsArgs, config: &RowscopeConfig) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let table = snapshot.table(&args.table)?;
    let fields = insert_fields(&snapshot.graph, table, config);

    if args.json {
        return print_json(&FieldsOutput {
            table: &args.table,
            fields,
        });
    }

    let rows = fields
        .into_iter()
        .map(|field| {
            vec![
                field.name,
                field.kind.to_string(),
                if field.required { "yes" } else { "no" }.to_string(),
                join_or_dash(&field.options),
                field.reference_table.unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["FIELD", "INPUT", "REQUIRED", "OPTIONS", "REFERENCES"], rows);
    Ok(())
}

/// Insert form for `table`, leaving out the configured identity column.
pub fn insert_fields(
    graph: &TypeGraph,
    table: &SnapshotTable,
    config: &RowscopeConfig,
) -> Vec<InsertField> {
    derive_insert_fields_with_identity(graph, &table.columns, &config.identity_column)
}
