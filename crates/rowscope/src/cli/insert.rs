//! insert command - parse form input into the row an insert would write
//!
//! Nothing is written back to the snapshot; the assembled row is printed.

use crate::cli::config::RowscopeConfig;
use crate::cli::error::HelpfulError;
use crate::cli::fields::insert_fields;
use crate::cli::output::{print_json, print_table};
use crate::cli::snapshot::Snapshot;
use anyhow::Result;
use rowscope_core::{build_insert_row, format_cell, InsertField, RawInput, Row};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct InsertArgs {
    pub snapshot: PathBuf,
    pub table: String,
    /// COLUMN=VALUE pairs
    pub set: Vec<String>,
    /// Checkbox columns to tick
    pub check: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InsertOutput<'a> {
    table: &'a str,
    row: Row,
}

pub fn run(args: InsertArgs, config: &RowscopeConfig) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let table = snapshot.table(&args.table)?;
    let fields = insert_fields(&snapshot.graph, table, config);

    let inputs = collect_inputs(&args.table, &fields, &args.set, &args.check)?;
    let row = build_insert_row(&fields, &inputs)?;
    info!(table = %args.table, columns = row.len(), "assembled insert row");

    if args.json {
        return print_json(&InsertOutput {
            table: &args.table,
            row,
        });
    }

    let rows = row
        .iter()
        .map(|(column, value)| vec![column.clone(), format_cell(value)])
        .collect();
    print_table(&["COLUMN", "VALUE"], rows);
    Ok(())
}

/// Turn `--set` and `--check` arguments into form inputs. Later `--set`s of
/// the same column win.
fn collect_inputs(
    table: &str,
    fields: &[InsertField],
    set: &[String],
    check: &[String],
) -> Result<HashMap<String, RawInput>> {
    let known: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
    let ensure_known = |column: &str| -> Result<()> {
        if known.contains(&column) {
            Ok(())
        } else {
            Err(HelpfulError::unknown_field(table, column, &known).into())
        }
    };

    let mut inputs = HashMap::new();
    for assignment in set {
        let (column, value) = assignment
            .split_once('=')
            .ok_or_else(|| HelpfulError::invalid_assignment(assignment))?;
        let column = column.trim();
        ensure_known(column)?;
        inputs.insert(column.to_string(), RawInput::from(value));
    }
    for column in check {
        ensure_known(column)?;
        inputs.insert(column.clone(), RawInput::Flag(true));
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowscope_core::FieldKind;

    fn field(name: &str, kind: FieldKind) -> InsertField {
        InsertField {
            name: name.to_string(),
            kind,
            required: true,
            options: Vec::new(),
            reference_table: None,
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_inputs() {
        let fields = vec![field("title", FieldKind::Text), field("done", FieldKind::Checkbox)];
        let inputs = collect_inputs(
            "todo",
            &fields,
            &args(&["title=a=b", "title = Buy milk"]),
            &args(&["done"]),
        )
        .unwrap();

        assert_eq!(inputs["title"], RawInput::from(" Buy milk"));
        assert_eq!(inputs["done"], RawInput::Flag(true));
    }

    #[test]
    fn test_collect_inputs_rejects_bad_arguments() {
        let fields = vec![field("title", FieldKind::Text)];

        let err = collect_inputs("todo", &fields, &args(&["title"]), &[]).unwrap_err();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert_eq!(helpful.message, "Invalid --set value: title");

        let err = collect_inputs("todo", &fields, &args(&["nope=1"]), &[]).unwrap_err();
        let helpful = err.downcast_ref::<HelpfulError>().unwrap();
        assert_eq!(helpful.message, "Table todo has no insertable column nope");

        assert!(collect_inputs("todo", &fields, &[], &args(&["nope"])).is_err());
    }
}
