//! Rowscope core: runtime schema introspection and form synthesis
//!
//! Works on two inputs a loosely-typed table store already has: the
//! declared type descriptor of each column, and the rows themselves.
//!
//! # Pipeline
//!
//! ```text
//! rows ──► classify ──► column type ("mixed(bytes|null)")
//!      └─► format_cell ("0xA4DE (2 B)")
//!
//! descriptors ──► format_schema_type ("\"low\" | \"high\"")
//!             └─► resolve_type ──► derive_insert_fields ──► form
//!                                                            │
//! submitted input ──► parse_insert_value ◄───────────────────┘
//! ```
//!
//! Everything here is pure and synchronous: no I/O, no shared state, no
//! retained state between calls.
//!
//! # Modules
//!
//! - [`value`]: runtime cell values and rows
//! - [`binary`]: byte sequence detection (native or index-keyed objects)
//! - [`hex_codec`]: hex preview encoding and hex input decoding
//! - [`classify`] / [`column`]: per-value kinds and per-column aggregation
//! - [`cell`]: display formatting
//! - [`descriptor`]: the descriptor graph and its JSON form
//! - [`resolve`] / [`schema_format`]: descriptor summaries and signatures
//! - [`insert`]: insert-field derivation and input parsing
//! - [`tables`]: table lists, search, paging, column summaries

pub mod binary;
pub mod cell;
pub mod classify;
pub mod column;
pub mod descriptor;
pub mod hex_codec;
pub mod insert;
pub mod resolve;
pub mod schema_format;
pub mod tables;
pub mod value;

pub use binary::{byte_sequence, is_binary_object, is_byte_sequence};
pub use cell::format_cell;
pub use classify::{classify_value, ValueKind};
pub use column::{infer_column_type, ColumnType};
pub use descriptor::{Columns, DescriptorError, TypeGraph, TypeId, TypeNode};
pub use hex_codec::{decode_hex, encode_hex_preview, HexError, HEX_PREVIEW_BYTES};
pub use insert::{
    build_insert_row, derive_insert_fields, derive_insert_fields_with_identity,
    parse_insert_value, FieldKind, InsertError, InsertField, RawInput, IDENTITY_COLUMN,
};
pub use resolve::{resolve_type, ResolvedType};
pub use schema_format::{format_schema_type, RECURSIVE_MARKER};
pub use tables::{
    describe_table, filter_rows_by_search, paginate, sort_tables, split_tables, ColumnSummary,
    Page, TableGroups, DEFAULT_INTERNAL_PREFIX,
};
pub use value::{CellValue, Row};
