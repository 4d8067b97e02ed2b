//! Human-readable type signatures
//!
//! Renders the raw descriptor graph (not the resolved summary), so the
//! output keeps the declared structure: `"low" | "high"`,
//! `TodoId<String>`, `Uint8Array (optional)`.

use std::collections::HashSet;

use crate::descriptor::{TypeGraph, TypeId, TypeNode};
use crate::value::{format_number, CellValue};

/// Marker rendered in place of a node that was already rendered in this call.
pub const RECURSIVE_MARKER: &str = "[Recursive]";

/// Number of keys listed when describing an untagged object.
const OPAQUE_KEY_LIMIT: usize = 6;

/// Render the descriptor `id` as a type signature.
pub fn format_schema_type(graph: &TypeGraph, id: TypeId) -> String {
    let mut seen = HashSet::new();
    render(graph, id, &mut seen)
}

fn render(graph: &TypeGraph, id: TypeId, seen: &mut HashSet<TypeId>) -> String {
    let node = match graph.get(id) {
        None | Some(TypeNode::Unknown) => return "Unknown".to_string(),
        Some(TypeNode::Function(name)) => {
            return name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Function".to_string())
        }
        Some(node) => node,
    };

    // Marks stay for the whole call: a node reached twice renders once.
    if !seen.insert(id) {
        return RECURSIVE_MARKER.to_string();
    }

    match node {
        TypeNode::Union(members) => members
            .iter()
            .map(|member| render(graph, *member, seen))
            .collect::<Vec<_>>()
            .join(" | "),
        TypeNode::Literal(value) => format_literal(value),
        TypeNode::Brand {
            brand: Some(brand),
            parent: Some(parent),
        } => format!("{}<{}>", brand, render(graph, *parent, seen)),
        TypeNode::Brand {
            brand: Some(brand),
            parent: None,
        } => brand.clone(),
        TypeNode::Brand { brand: None, .. } => "Brand".to_string(),
        TypeNode::Optional(parent) => format!("{} (optional)", render(graph, *parent, seen)),
        TypeNode::Id { .. } => "Id".to_string(),
        TypeNode::Named(tag) => tag.clone(),
        TypeNode::Opaque { constructor, keys } => format_opaque(constructor.as_deref(), keys),
        TypeNode::Unknown | TypeNode::Function(_) => "Unknown".to_string(),
    }
}

fn format_literal(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s)),
        CellValue::Number(n) => format_number(*n),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Null => "null".to_string(),
        CellValue::Undefined => "undefined".to_string(),
        CellValue::Bytes(_) | CellValue::Array(_) | CellValue::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

fn format_opaque(constructor: Option<&str>, keys: &[String]) -> String {
    match constructor {
        Some(name) if !name.is_empty() && name != "Object" => name.to_string(),
        _ if !keys.is_empty() => {
            let shown: Vec<&str> = keys
                .iter()
                .take(OPAQUE_KEY_LIMIT)
                .map(String::as_str)
                .collect();
            format!("Object({})", shown.join(", "))
        }
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_of_literals() {
        let mut graph = TypeGraph::new();
        let priority = graph.literal_union(["low", "high"]);
        assert_eq!(format_schema_type(&graph, priority), r#""low" | "high""#);
    }

    #[test]
    fn test_non_string_literals_are_plain() {
        let mut graph = TypeGraph::new();
        let zero = graph.literal(0.0);
        let yes = graph.literal(true);
        let null = graph.literal(CellValue::Null);
        let union = graph.union([zero, yes, null]);
        assert_eq!(format_schema_type(&graph, union), "0 | true | null");
    }

    #[test]
    fn test_brand_and_optional() {
        let mut graph = TypeGraph::new();
        let string = graph.named("String");
        let branded = graph.brand("ExampleId", string);
        let other_string = graph.named("String");
        let optional = graph.optional(other_string);

        assert_eq!(format_schema_type(&graph, branded), "ExampleId<String>");
        assert_eq!(format_schema_type(&graph, optional), "String (optional)");
    }

    #[test]
    fn test_brand_variants() {
        let mut graph = TypeGraph::new();
        let bare = graph.add(TypeNode::Brand {
            brand: Some("Tag".to_string()),
            parent: None,
        });
        let nameless = graph.add(TypeNode::Brand {
            brand: None,
            parent: None,
        });
        assert_eq!(format_schema_type(&graph, bare), "Tag");
        assert_eq!(format_schema_type(&graph, nameless), "Brand");
    }

    #[test]
    fn test_recursive_types() {
        let mut graph = TypeGraph::new();
        let union = graph.reserve();
        graph.define(union, TypeNode::Union(vec![union])).unwrap();
        assert_eq!(format_schema_type(&graph, union), RECURSIVE_MARKER);
    }

    #[test]
    fn test_mutual_recursion() {
        let mut graph = TypeGraph::new();
        let a = graph.reserve();
        let b = graph.reserve();
        graph.define(a, TypeNode::Optional(b)).unwrap();
        graph
            .define(
                b,
                TypeNode::Brand {
                    brand: Some("Node".to_string()),
                    parent: Some(a),
                },
            )
            .unwrap();
        assert_eq!(
            format_schema_type(&graph, a),
            "Node<[Recursive]> (optional)"
        );
    }

    #[test]
    fn test_fresh_seen_set_per_call() {
        let mut graph = TypeGraph::new();
        let string = graph.named("String");
        assert_eq!(format_schema_type(&graph, string), "String");
        assert_eq!(format_schema_type(&graph, string), "String");
    }

    #[test]
    fn test_opaque_and_non_objects() {
        let mut graph = TypeGraph::new();
        let keys: Vec<String> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        let listed = graph.add(TypeNode::Opaque {
            constructor: Some("Object".to_string()),
            keys,
        });
        let classed = graph.add(TypeNode::Opaque {
            constructor: Some("StringSchema".to_string()),
            keys: Vec::new(),
        });
        let empty = graph.add(TypeNode::Opaque {
            constructor: None,
            keys: Vec::new(),
        });
        let function = graph.add(TypeNode::Function(Some("Int".to_string())));
        let anonymous = graph.add(TypeNode::Function(None));
        let unknown = graph.add(TypeNode::Unknown);

        assert_eq!(format_schema_type(&graph, listed), "Object(a, b, c, d, e, f)");
        assert_eq!(format_schema_type(&graph, classed), "StringSchema");
        assert_eq!(format_schema_type(&graph, empty), "Unknown");
        assert_eq!(format_schema_type(&graph, function), "Int");
        assert_eq!(format_schema_type(&graph, anonymous), "Function");
        assert_eq!(format_schema_type(&graph, unknown), "Unknown");
    }

    #[test]
    fn test_id_renders_tag() {
        let mut graph = TypeGraph::new();
        let id = graph.id("Todo");
        assert_eq!(format_schema_type(&graph, id), "Id");
    }
}
