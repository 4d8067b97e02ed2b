//! describe command - declared and observed type of every column

use crate::cli::output::{print_json, print_table};
use crate::cli::snapshot::Snapshot;
use anyhow::Result;
use rowscope_core::{describe_table, ColumnSummary};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct DescribeArgs {
    pub snapshot: PathBuf,
    pub table: String,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DescribeOutput<'a> {
    table: &'a str,
    row_count: usize,
    columns: Vec<ColumnSummary>,
}

pub fn run(args: DescribeArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let table = snapshot.table(&args.table)?;
    let columns = describe_table(&snapshot.graph, &table.columns, &table.rows);

    if args.json {
        return print_json(&DescribeOutput {
            table: &args.table,
            row_count: table.rows.len(),
            columns,
        });
    }

    println!("{} ({} rows)", args.table, table.rows.len());
    let rows = columns
        .into_iter()
        .map(|column| {
            vec![
                column.name,
                column.schema_type,
                column.runtime_type.to_string(),
            ]
        })
        .collect();
    print_table(&["COLUMN", "SCHEMA TYPE", "RUNTIME TYPE"], rows);
    Ok(())
}
