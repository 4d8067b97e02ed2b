//! Insert-field derivation
//!
//! Turns a table's column descriptors into the inputs of an "insert row"
//! form. Widget selection is a first-match rule table ([`WIDGET_RULES`]),
//! so each heuristic can be read and tested on its own.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{Columns, TypeGraph};
use crate::resolve::{lower_camel, resolve_type, ResolvedType};

/// Column holding the row identity; it is generated, never entered.
pub const IDENTITY_COLUMN: &str = "id";

/// Input widget for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    /// Hex text decoded to bytes
    Hex,
    /// Fixed options or rows of a referenced table
    Select,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Hex => "hex",
            FieldKind::Select => "select",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input of an insert form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for literal selects
    pub options: Vec<String>,
    /// Table whose rows populate a reference select
    pub reference_table: Option<String>,
}

/// One widget heuristic.
pub struct WidgetRule {
    pub name: &'static str,
    pub applies: fn(&ResolvedType, Option<&str>) -> bool,
    pub kind: FieldKind,
}

/// Widget heuristics in priority order. Anything unmatched is [`FieldKind::Text`].
pub const WIDGET_RULES: &[WidgetRule] = &[
    WidgetRule {
        name: "literal options",
        applies: has_literal_options,
        kind: FieldKind::Select,
    },
    WidgetRule {
        name: "table reference",
        applies: has_reference,
        kind: FieldKind::Select,
    },
    WidgetRule {
        name: "boolean",
        applies: is_boolean,
        kind: FieldKind::Checkbox,
    },
    WidgetRule {
        name: "numeric",
        applies: is_numeric,
        kind: FieldKind::Number,
    },
    WidgetRule {
        name: "binary",
        applies: is_binary,
        kind: FieldKind::Hex,
    },
];

fn has_literal_options(resolved: &ResolvedType, _reference: Option<&str>) -> bool {
    !resolved.options.is_empty()
}

fn has_reference(_resolved: &ResolvedType, reference: Option<&str>) -> bool {
    reference.is_some()
}

fn is_boolean(resolved: &ResolvedType, _reference: Option<&str>) -> bool {
    matches!(resolved.base.as_str(), "Boolean" | "SqliteBoolean")
}

fn is_numeric(resolved: &ResolvedType, _reference: Option<&str>) -> bool {
    resolved.base.contains("Number")
}

fn is_binary(resolved: &ResolvedType, _reference: Option<&str>) -> bool {
    matches!(resolved.base.as_str(), "Uint8Array" | "IdBytes")
}

/// Pick the widget for a resolved column.
pub fn widget_for(resolved: &ResolvedType, reference: Option<&str>) -> FieldKind {
    WIDGET_RULES
        .iter()
        .find(|rule| (rule.applies)(resolved, reference))
        .map(|rule| rule.kind)
        .unwrap_or(FieldKind::Text)
}

/// Table an id brand points at: `TodoCategoryId` -> `todoCategory`.
///
/// Brands without the `Id` suffix, or consisting of it alone, name no table.
pub fn reference_from_brand(brand: &str) -> Option<String> {
    brand
        .strip_suffix("Id")
        .filter(|table| !table.is_empty())
        .map(lower_camel)
}

/// The resolver's explicit reference wins over the brand naming convention.
fn reference_table(resolved: &ResolvedType) -> Option<String> {
    resolved
        .reference
        .clone()
        .or_else(|| resolved.brand.as_deref().and_then(reference_from_brand))
}

/// Derive the insert form for a table, in column order, without the
/// identity column.
pub fn derive_insert_fields(graph: &TypeGraph, columns: &Columns) -> Vec<InsertField> {
    derive_insert_fields_with_identity(graph, columns, IDENTITY_COLUMN)
}

/// [`derive_insert_fields`] for stores whose generated key column is named
/// `identity_column`. Only that column is left out.
pub fn derive_insert_fields_with_identity(
    graph: &TypeGraph,
    columns: &Columns,
    identity_column: &str,
) -> Vec<InsertField> {
    columns
        .iter()
        .filter(|(name, _)| name.as_str() != identity_column)
        .map(|(name, type_id)| {
            let resolved = resolve_type(graph, *type_id);
            let reference = reference_table(&resolved);
            let kind = widget_for(&resolved, reference.as_deref());

            debug!(
                field = %name,
                base = %resolved.base,
                kind = %kind,
                reference = ?reference,
                "derived insert field"
            );

            InsertField {
                name: name.clone(),
                kind,
                required: !resolved.nullable && !resolved.optional,
                options: resolved.options,
                reference_table: reference,
            }
        })
        .collect()
}
