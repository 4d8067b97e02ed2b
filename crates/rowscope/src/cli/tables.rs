//! tables command - list the tables of a snapshot

use crate::cli::config::RowscopeConfig;
use crate::cli::output::{print_json, print_table};
use crate::cli::snapshot::Snapshot;
use anyhow::Result;
use rowscope_core::{sort_tables, split_tables, TableGroups};
use std::path::PathBuf;

#[derive(Debug)]
pub struct TablesArgs {
    pub snapshot: PathBuf,
    pub json: bool,
}

pub fn run(args: TablesArgs, config: &RowscopeConfig) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let groups = table_groups(&snapshot, config);

    if args.json {
        return print_json(&groups);
    }

    let row_count = |name: &str| {
        snapshot
            .tables
            .get(name)
            .map(|table| table.rows.len())
            .unwrap_or_default()
            .to_string()
    };
    let rows: Vec<Vec<String>> = groups
        .regular
        .iter()
        .map(|name| (name, "regular"))
        .chain(groups.internal.iter().map(|name| (name, "internal")))
        .map(|(name, group)| vec![name.clone(), group.to_string(), row_count(name.as_str())])
        .collect();

    print_table(&["TABLE", "GROUP", "ROWS"], rows);
    Ok(())
}

pub fn table_groups(snapshot: &Snapshot, config: &RowscopeConfig) -> TableGroups {
    let sorted = sort_tables(&snapshot.table_names());
    split_tables(&sorted, &config.internal_table_prefix)
}
