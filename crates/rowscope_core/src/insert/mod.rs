//! Schema-driven row insertion
//!
//! - [`fields`]: derive form inputs from column descriptors
//! - [`parse`]: turn submitted inputs back into storable values

pub mod fields;
pub mod parse;

pub use fields::{
    derive_insert_fields, derive_insert_fields_with_identity, reference_from_brand, widget_for,
    FieldKind, InsertField, WidgetRule, IDENTITY_COLUMN, WIDGET_RULES,
};
pub use parse::{build_insert_row, parse_insert_value, InsertError, RawInput};
