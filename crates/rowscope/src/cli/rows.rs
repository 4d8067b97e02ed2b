//! rows command - browse a table's rows as displayed cells

use crate::cli::config::RowscopeConfig;
use crate::cli::output::{print_json, print_table};
use crate::cli::snapshot::{Snapshot, SnapshotTable};
use anyhow::Result;
use indexmap::IndexMap;
use rowscope_core::{filter_rows_by_search, format_cell, paginate, Page, Row};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct RowsArgs {
    pub snapshot: PathBuf,
    pub table: String,
    pub search: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RowsOutput<'a> {
    table: &'a str,
    columns: Vec<&'a str>,
    #[serde(flatten)]
    page: Page<IndexMap<String, String>>,
}

pub fn run(args: RowsArgs, config: &RowscopeConfig) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let table = snapshot.table(&args.table)?;
    let page_size = args.page_size.unwrap_or(config.page_size);
    let columns = table.column_names();
    let page = rows_page(table, &columns, args.search.as_deref(), args.page, page_size);

    if args.json {
        return print_json(&RowsOutput {
            table: &args.table,
            columns,
            page,
        });
    }

    let rows = page
        .items
        .iter()
        .map(|cells| cells.values().cloned().collect())
        .collect();
    print_table(&columns, rows);
    println!(
        "Page {}/{} ({} matching rows)",
        page.page, page.total_pages, page.total_items
    );
    Ok(())
}

/// Search, then page, then format every cell of the page.
fn rows_page(
    table: &SnapshotTable,
    columns: &[&str],
    search: Option<&str>,
    page: usize,
    page_size: usize,
) -> Page<IndexMap<String, String>> {
    let matching = filter_rows_by_search(&table.rows, search.unwrap_or_default(), columns);
    let page = paginate(&matching, page, page_size);

    Page {
        items: page.items.iter().map(|row| display_row(row, columns)).collect(),
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}

/// Missing cells display as empty text.
fn display_row(row: &Row, columns: &[&str]) -> IndexMap<String, String> {
    columns
        .iter()
        .map(|column| {
            let text = row.get(*column).map(format_cell).unwrap_or_default();
            (column.to_string(), text)
        })
        .collect()
}
