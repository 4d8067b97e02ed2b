//! Table listing, row search and paging
//!
//! Helpers for a browsing UI: order the table list, keep the store's own
//! bookkeeping tables apart, filter rows by what their cells display, and
//! cut row sets into pages.

use serde::Serialize;

use crate::cell::format_cell;
use crate::column::{infer_column_type, ColumnType};
use crate::descriptor::{Columns, TypeGraph};
use crate::schema_format::format_schema_type;
use crate::value::Row;

/// Prefix of the data store's internal tables.
pub const DEFAULT_INTERNAL_PREFIX: &str = "evolu_";

/// Table names split into user tables and internal ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableGroups {
    pub regular: Vec<String>,
    pub internal: Vec<String>,
}

/// Sort table names alphabetically, ignoring case. Stable for names that
/// differ only in case.
pub fn sort_tables<S: AsRef<str>>(tables: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = tables.iter().map(|t| t.as_ref().to_string()).collect();
    sorted.sort_by_cached_key(|t| t.to_lowercase());
    sorted
}

/// Split names on `internal_prefix`, keeping the input order in each group.
pub fn split_tables<S: AsRef<str>>(tables: &[S], internal_prefix: &str) -> TableGroups {
    let (internal, regular): (Vec<String>, Vec<String>) = tables
        .iter()
        .map(|t| t.as_ref().to_string())
        .partition(|t| t.starts_with(internal_prefix));
    TableGroups { regular, internal }
}

/// Rows whose displayed value in any of `columns` contains `query`,
/// case-insensitively. A blank query keeps every row.
pub fn filter_rows_by_search<'a>(rows: &'a [Row], query: &str, columns: &[&str]) -> Vec<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            columns.iter().any(|column| {
                row.get(*column)
                    .map(|value| format_cell(value).to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually returned
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// At least 1, even for an empty list
    pub total_pages: usize,
}

/// Cut `items` into pages of `page_size` and return page `page` (1-based).
///
/// Page 0 is treated as page 1 and pages past the end clamp to the last
/// page; a page size of 0 is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items.get(start..end).unwrap_or_default().to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Declared and observed type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub schema_type: String,
    pub runtime_type: ColumnType,
}

/// Summarize every column of a table: schema columns first, then keys that
/// only appear in the rows, in the order they are first seen.
pub fn describe_table(graph: &TypeGraph, columns: &Columns, rows: &[Row]) -> Vec<ColumnSummary> {
    let mut summaries: Vec<ColumnSummary> = columns
        .iter()
        .map(|(name, type_id)| ColumnSummary {
            name: name.clone(),
            schema_type: format_schema_type(graph, *type_id),
            runtime_type: infer_column_type(rows, name),
        })
        .collect();

    for row in rows {
        for key in row.keys() {
            if columns.contains_key(key) || summaries.iter().any(|s| &s.name == key) {
                continue;
            }
            summaries.push(ColumnSummary {
                name: key.clone(),
                schema_type: "Unknown".to_string(),
                runtime_type: infer_column_type(rows, key),
            });
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ValueKind;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sort_tables_case_insensitive() {
        assert_eq!(
            sort_tables(&["zeta", "Alpha", "beta"]),
            vec!["Alpha", "beta", "zeta"]
        );
    }

    #[test]
    fn test_split_tables() {
        let groups = split_tables(&["todo", "evolu_history", "chatMessage"], DEFAULT_INTERNAL_PREFIX);
        assert_eq!(groups.regular, vec!["todo", "chatMessage"]);
        assert_eq!(groups.internal, vec!["evolu_history"]);
    }

    #[test]
    fn test_filter_rows_by_search() {
        let rows = rows(json!([
            {"id": "1", "title": "Buy milk", "priority": "high"},
            {"id": "2", "title": "Read docs", "priority": "low"},
        ]));

        assert_eq!(filter_rows_by_search(&rows, "", &["title", "priority"]).len(), 2);
        let ids = |found: Vec<&Row>| -> Vec<String> {
            found.iter().map(|row| format_cell(&row["id"])).collect()
        };
        assert_eq!(ids(filter_rows_by_search(&rows, "milk", &["title"])), vec!["1"]);
        assert_eq!(ids(filter_rows_by_search(&rows, "LOW", &["priority"])), vec!["2"]);
        assert!(filter_rows_by_search(&rows, "missing", &["title"]).is_empty());
        assert!(filter_rows_by_search(&rows, "milk", &["priority"]).is_empty());
    }

    #[test]
    fn test_search_matches_hex_preview() {
        let rows = rows(json!([{"blob": {"0": 164, "1": 222}}]));
        assert_eq!(filter_rows_by_search(&rows, "a4de", &["blob"]).len(), 1);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();

        let first = paginate(&items, 1, 3);
        assert_eq!(first.items, vec![1, 2, 3]);
        assert_eq!(first.total_pages, 3);

        let last = paginate(&items, 3, 3);
        assert_eq!(last.items, vec![7]);

        let clamped = paginate(&items, 99, 3);
        assert_eq!(clamped.page, 3);

        let zero = paginate(&items, 0, 0);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.page_size, 1);
        assert_eq!(zero.items, vec![1]);

        let empty = paginate::<u32>(&[], 2, 10);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_describe_table() {
        let mut graph = TypeGraph::new();
        let mut columns = Columns::new();
        let title = graph.named("String");
        let blob_type = graph.named("Uint8Array");
        let blob = graph.null_or(blob_type);
        columns.insert("title".to_string(), title);
        columns.insert("blob".to_string(), blob);

        let rows = rows(json!([
            {"title": "first", "blob": {"0": 1}, "extra": 1},
            {"title": "second", "blob": null},
        ]));

        let summaries = describe_table(&graph, &columns, &rows);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].schema_type, "String");
        assert_eq!(summaries[0].runtime_type, ColumnType::Uniform(ValueKind::String));
        assert_eq!(summaries[1].schema_type, "Null | Uint8Array");
        assert_eq!(summaries[1].runtime_type.to_string(), "mixed(bytes|null)");
        assert_eq!(summaries[2].name, "extra");
        assert_eq!(summaries[2].schema_type, "Unknown");
    }
}
