//! Descriptor resolution
//!
//! Flattens a descriptor graph into a [`ResolvedType`]: the one base kind a
//! form needs to pick a widget, plus the nullability, literal options,
//! brand and foreign table gathered along the way.
//!
//! # Cycles
//!
//! Resolution keeps the ids on the current path. Re-entering one of them
//! yields an `Unknown` summary for that branch, so a self-referential
//! descriptor resolves in bounded time. Finished nodes are memoized for the
//! rest of the call: a sub-graph shared by many parents is resolved once.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::trace;

use crate::cell::format_cell;
use crate::descriptor::{TypeGraph, TypeId, TypeNode};
use crate::value::CellValue;

/// Base kind reported for descriptors that carry no usable type information.
pub const UNKNOWN_KIND: &str = "Unknown";

/// Flattened summary of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    /// Base kind name (`String`, `Uint8Array`, `Id`, `Union`, ...)
    pub base: String,
    pub nullable: bool,
    pub optional: bool,
    /// Literal options in first-seen order, without duplicates
    pub options: Vec<String>,
    pub brand: Option<String>,
    /// Table referenced by an id type, lower-camel-cased
    pub reference: Option<String>,
}

impl ResolvedType {
    pub fn unknown() -> Self {
        Self::of_kind(UNKNOWN_KIND)
    }

    fn of_kind(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            nullable: false,
            optional: false,
            options: Vec::new(),
            brand: None,
            reference: None,
        }
    }
}

/// Resolve the descriptor `id` in `graph`.
pub fn resolve_type(graph: &TypeGraph, id: TypeId) -> ResolvedType {
    let mut walk = Walk::default();
    resolve_node(graph, id, &mut walk)
}

/// Per-call traversal state.
#[derive(Default)]
struct Walk {
    /// Ids being resolved on the current path
    path: HashSet<TypeId>,
    /// Finished resolutions
    done: HashMap<TypeId, ResolvedType>,
}

fn resolve_node(graph: &TypeGraph, id: TypeId, walk: &mut Walk) -> ResolvedType {
    if let Some(resolved) = walk.done.get(&id) {
        return resolved.clone();
    }
    if !walk.path.insert(id) {
        trace!(type_id = id.index(), "descriptor cycle, resolving branch as Unknown");
        return ResolvedType::unknown();
    }

    let resolved = match graph.get(id) {
        None | Some(TypeNode::Unknown | TypeNode::Function(_) | TypeNode::Opaque { .. }) => {
            ResolvedType::unknown()
        }
        Some(TypeNode::Optional(parent)) => {
            let mut resolved = resolve_node(graph, *parent, walk);
            resolved.optional = true;
            resolved
        }
        Some(TypeNode::Brand {
            brand,
            parent: Some(parent),
        }) => {
            let mut resolved = resolve_node(graph, *parent, walk);
            if let Some(brand) = brand {
                resolved.brand = Some(brand.clone());
            }
            resolved
        }
        Some(TypeNode::Brand { parent: None, .. }) => ResolvedType::of_kind("Brand"),
        Some(TypeNode::Id { table }) => ResolvedType {
            reference: Some(lower_camel(table)),
            ..ResolvedType::of_kind("Id")
        },
        Some(TypeNode::Literal(value)) => resolve_literal(value),
        Some(TypeNode::Union(members)) => resolve_union(graph, members, walk),
        Some(TypeNode::Named(tag)) => ResolvedType {
            nullable: tag == "Null",
            ..ResolvedType::of_kind(tag.as_str())
        },
    };

    walk.path.remove(&id);
    walk.done.insert(id, resolved.clone());
    resolved
}

fn resolve_literal(value: &CellValue) -> ResolvedType {
    let base = match value {
        CellValue::String(_) => "String",
        CellValue::Number(_) => "Number",
        CellValue::Bool(_) => "Boolean",
        CellValue::Null => "Null",
        CellValue::Undefined => "Undefined",
        CellValue::Bytes(_) | CellValue::Array(_) | CellValue::Object(_) => "Object",
    };

    let mut resolved = ResolvedType::of_kind(base);
    if value.is_null() {
        resolved.nullable = true;
    } else {
        resolved.options.push(format_cell(value));
    }
    resolved
}

fn resolve_union(graph: &TypeGraph, members: &[TypeId], walk: &mut Walk) -> ResolvedType {
    let mut nullable = false;
    let mut optional = false;
    let mut kinds: Vec<String> = Vec::new();
    let mut options: Vec<String> = Vec::new();
    let mut brand = None;
    let mut reference = None;

    for member in members {
        let resolved = resolve_node(graph, *member, walk);

        if resolved.nullable || resolved.base == "Null" {
            nullable = true;
        } else if !kinds.contains(&resolved.base) {
            kinds.push(resolved.base);
        }
        optional |= resolved.optional;

        for option in resolved.options {
            if !options.contains(&option) {
                options.push(option);
            }
        }
        if brand.is_none() {
            brand = resolved.brand.filter(|b| !b.is_empty());
        }
        if reference.is_none() {
            reference = resolved.reference.filter(|r| !r.is_empty());
        }
    }

    let base = match kinds.as_slice() {
        [single] => single.clone(),
        _ => "Union".to_string(),
    };

    ResolvedType {
        base,
        nullable,
        optional,
        options,
        brand,
        reference,
    }
}

/// Lowercase the first character, leave the rest untouched:
/// `TodoCategory` -> `todoCategory`.
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
