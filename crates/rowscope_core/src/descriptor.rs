//! Column type descriptors
//!
//! A descriptor is the declared type of a column: a union of literals, a
//! branded string, an optional blob, a reference to another table's id.
//! Descriptors may refer to themselves (directly or through other
//! descriptors), so they live in a [`TypeGraph`] arena and point at each
//! other by [`TypeId`]. Every traversal tracks visited ids, which makes
//! cycle detection an identity check rather than a structural comparison.
//!
//! # JSON form
//!
//! ```text
//! {"name": "Union", "members": [ ... ]}
//! {"name": "Literal", "expected": "low"}
//! {"name": "Brand", "brand": "TodoId", "parentType": { ... }}
//! {"name": "Optional", "parent": { ... }}
//! {"name": "Id", "table": "Todo"}
//! {"name": "String"}                      any other tag
//! {"$ref": "Node"}                        named type from the snapshot
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::debug;

use crate::value::CellValue;

/// Handle of a node inside a [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered column name -> descriptor mapping for one table.
pub type Columns = IndexMap<String, TypeId>;

/// One descriptor node.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// Any of the member types
    Union(Vec<TypeId>),
    /// Exactly this value
    Literal(CellValue),
    /// A named wrapper distinguishing values that share a representation
    Brand {
        brand: Option<String>,
        parent: Option<TypeId>,
    },
    /// The parent type, or nothing
    Optional(TypeId),
    /// Identifier of a row in `table`
    Id { table: String },
    /// Primitive or any other tagged type, kept verbatim
    Named(String),
    /// Object without a usable tag
    Opaque {
        constructor: Option<String>,
        keys: Vec<String>,
    },
    /// A callable standing in for a type
    Function(Option<String>),
    /// Anything else (not an object)
    Unknown,
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("unknown type reference: {0}")]
    UnknownRef(String),

    #[error("type reference must be a string, got {0}")]
    InvalidRef(String),

    #[error("named type {0} cannot be a bare reference")]
    BareAlias(String),

    #[error("type id {0} does not exist in this graph")]
    UnknownTypeId(usize),
}

/// Arena of descriptor nodes.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.0)
    }

    pub fn add(&mut self, node: TypeNode) -> TypeId {
        self.nodes.push(node);
        TypeId(self.nodes.len() - 1)
    }

    /// Allocate a placeholder to be filled by [`TypeGraph::define`].
    ///
    /// This is how cycles are built: reserve, reference the id, then define.
    pub fn reserve(&mut self) -> TypeId {
        self.add(TypeNode::Unknown)
    }

    pub fn define(&mut self, id: TypeId, node: TypeNode) -> Result<(), DescriptorError> {
        let slot = self
            .nodes
            .get_mut(id.0)
            .ok_or(DescriptorError::UnknownTypeId(id.0))?;
        *slot = node;
        Ok(())
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn named(&mut self, tag: impl Into<String>) -> TypeId {
        self.add(TypeNode::Named(tag.into()))
    }

    pub fn literal(&mut self, value: impl Into<CellValue>) -> TypeId {
        self.add(TypeNode::Literal(value.into()))
    }

    pub fn union(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.add(TypeNode::Union(members.into_iter().collect()))
    }

    /// Union of string literals, e.g. `literal_union(["low", "high"])`.
    pub fn literal_union<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) -> TypeId {
        let members: Vec<TypeId> = values.into_iter().map(|v| self.literal(v)).collect();
        self.union(members)
    }

    pub fn brand(&mut self, brand: impl Into<String>, parent: TypeId) -> TypeId {
        self.add(TypeNode::Brand {
            brand: Some(brand.into()),
            parent: Some(parent),
        })
    }

    pub fn optional(&mut self, parent: TypeId) -> TypeId {
        self.add(TypeNode::Optional(parent))
    }

    pub fn id(&mut self, table: impl Into<String>) -> TypeId {
        self.add(TypeNode::Id {
            table: table.into(),
        })
    }

    /// `Null | inner`
    pub fn null_or(&mut self, inner: TypeId) -> TypeId {
        let null = self.named("Null");
        self.union([null, inner])
    }

    // ========================================================================
    // JSON interning
    // ========================================================================

    /// Intern a map of named descriptors that may reference each other
    /// (and themselves) through `{"$ref": "Name"}`.
    pub fn intern_named(
        &mut self,
        types: &serde_json::Map<String, JsonValue>,
    ) -> Result<HashMap<String, TypeId>, DescriptorError> {
        let named: HashMap<String, TypeId> = types
            .keys()
            .map(|name| (name.clone(), self.reserve()))
            .collect();

        for (name, definition) in types {
            if ref_target(definition).is_some() {
                return Err(DescriptorError::BareAlias(name.clone()));
            }
            let node = self.build_node(definition, &named)?;
            self.define(named[name], node)?;
        }

        debug!(count = named.len(), "interned named descriptor types");
        Ok(named)
    }

    /// Intern one descriptor in its JSON form, resolving `$ref`s against
    /// `named`.
    pub fn intern_json(
        &mut self,
        value: &JsonValue,
        named: &HashMap<String, TypeId>,
    ) -> Result<TypeId, DescriptorError> {
        if let Some(target) = ref_target(value) {
            let target = target.as_str().ok_or_else(|| {
                DescriptorError::InvalidRef(target.to_string())
            })?;
            return named
                .get(target)
                .copied()
                .ok_or_else(|| DescriptorError::UnknownRef(target.to_string()));
        }

        let node = self.build_node(value, named)?;
        Ok(self.add(node))
    }

    /// Intern a table's columns in their declared order.
    pub fn intern_columns(
        &mut self,
        columns: &serde_json::Map<String, JsonValue>,
        named: &HashMap<String, TypeId>,
    ) -> Result<Columns, DescriptorError> {
        columns
            .iter()
            .map(|(name, descriptor)| Ok((name.clone(), self.intern_json(descriptor, named)?)))
            .collect()
    }

    fn build_node(
        &mut self,
        value: &JsonValue,
        named: &HashMap<String, TypeId>,
    ) -> Result<TypeNode, DescriptorError> {
        let JsonValue::Object(object) = value else {
            return Ok(TypeNode::Unknown);
        };

        let tag = object
            .get("name")
            .and_then(JsonValue::as_str)
            .filter(|tag| !tag.is_empty());

        let node = match tag {
            Some("Union") if object.get("members").is_some_and(JsonValue::is_array) => {
                let members = object
                    .get("members")
                    .and_then(JsonValue::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let ids = members
                    .iter()
                    .map(|member| self.intern_json(member, named))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeNode::Union(ids)
            }
            Some("Literal") if object.contains_key("expected") => {
                let expected = object.get("expected").cloned().unwrap_or_default();
                TypeNode::Literal(CellValue::from(expected))
            }
            Some("Brand") => {
                let parent = match object.get("parentType") {
                    None | Some(JsonValue::Null) => None,
                    Some(parent) => Some(self.intern_json(parent, named)?),
                };
                TypeNode::Brand {
                    brand: object.get("brand").and_then(JsonValue::as_str).map(str::to_string),
                    parent,
                }
            }
            Some("Optional") if object.contains_key("parent") => {
                let parent = object.get("parent").cloned().unwrap_or_default();
                TypeNode::Optional(self.intern_json(&parent, named)?)
            }
            Some("Id") => match object.get("table").and_then(JsonValue::as_str) {
                Some(table) if !table.is_empty() => TypeNode::Id {
                    table: table.to_string(),
                },
                _ => TypeNode::Named("Id".to_string()),
            },
            Some(other) => TypeNode::Named(other.to_string()),
            None => TypeNode::Opaque {
                constructor: object
                    .get("constructor")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string),
                keys: object
                    .keys()
                    .filter(|key| key.as_str() != "constructor")
                    .cloned()
                    .collect(),
            },
        };

        Ok(node)
    }
}

fn ref_target(value: &JsonValue) -> Option<&JsonValue> {
    value.as_object().and_then(|object| object.get("$ref"))
}
