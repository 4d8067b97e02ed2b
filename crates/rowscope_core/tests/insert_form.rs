//! End-to-end form synthesis: JSON descriptors -> fields -> parsed row.

use std::collections::HashMap;

use rowscope_core::{
    build_insert_row, derive_insert_fields, format_schema_type, resolve_type, CellValue, Columns,
    FieldKind, InsertError, InsertField, RawInput, TypeGraph, RECURSIVE_MARKER,
};
use serde_json::json;

fn todo_columns(graph: &mut TypeGraph) -> Columns {
    let columns = json!({
        "id": {"name": "Brand", "parentType": {"name": "String"}},
        "title": {"name": "String"},
        "categoryId": {
            "name": "Union",
            "members": [
                {"name": "Null"},
                {"name": "Brand", "brand": "TodoCategoryId", "parentType": {"name": "String"}}
            ]
        },
        "projectId": {"name": "Id", "table": "Project"},
        "priority": {
            "name": "Union",
            "members": [
                {"name": "Literal", "expected": "low"},
                {"name": "Literal", "expected": "high"}
            ]
        },
        "done": {"name": "SqliteBoolean"},
        "attachment": {
            "name": "Union",
            "members": [{"name": "Null"}, {"name": "Uint8Array"}]
        }
    });

    graph
        .intern_columns(columns.as_object().unwrap(), &HashMap::new())
        .unwrap()
}

fn find<'a>(fields: &'a [InsertField], name: &str) -> &'a InsertField {
    fields
        .iter()
        .find(|field| field.name == name)
        .unwrap_or_else(|| panic!("no field named {}", name))
}

#[test]
fn test_builds_insert_fields_from_schema_columns() {
    let mut graph = TypeGraph::new();
    let columns = todo_columns(&mut graph);
    let fields = derive_insert_fields(&graph, &columns);

    let names: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["title", "categoryId", "projectId", "priority", "done", "attachment"]
    );

    let title = find(&fields, "title");
    assert_eq!(title.kind, FieldKind::Text);
    assert!(title.required);

    let category = find(&fields, "categoryId");
    assert_eq!(category.kind, FieldKind::Select);
    assert_eq!(category.reference_table.as_deref(), Some("todoCategory"));
    assert!(!category.required);

    let project = find(&fields, "projectId");
    assert_eq!(project.kind, FieldKind::Select);
    assert_eq!(project.reference_table.as_deref(), Some("project"));

    let priority = find(&fields, "priority");
    assert_eq!(priority.kind, FieldKind::Select);
    assert_eq!(priority.options, vec!["low", "high"]);
    assert!(priority.required);

    assert_eq!(find(&fields, "done").kind, FieldKind::Checkbox);

    let attachment = find(&fields, "attachment");
    assert_eq!(attachment.kind, FieldKind::Hex);
    assert!(!attachment.required);
}

#[test]
fn test_union_of_literals_signature_and_field() {
    let mut graph = TypeGraph::new();
    let priority = graph.literal_union(["low", "high"]);
    let mut columns = Columns::new();
    columns.insert("priority".to_string(), priority);

    assert_eq!(format_schema_type(&graph, priority), r#""low" | "high""#);

    let fields = derive_insert_fields(&graph, &columns);
    assert_eq!(
        fields,
        vec![InsertField {
            name: "priority".to_string(),
            kind: FieldKind::Select,
            required: true,
            options: vec!["low".to_string(), "high".to_string()],
            reference_table: None,
        }]
    );
}

#[test]
fn test_optional_number_column() {
    let mut graph = TypeGraph::new();
    let number = graph.named("NonNegativeNumber");
    let optional = graph.optional(number);
    let mut columns = Columns::new();
    columns.insert("count".to_string(), optional);

    let fields = derive_insert_fields(&graph, &columns);
    assert_eq!(fields[0].kind, FieldKind::Number);
    assert!(!fields[0].required);
}

#[test]
fn test_recursive_named_types() {
    let types = json!({
        "Node": {
            "name": "Union",
            "members": [{"name": "Null"}, {"name": "Optional", "parent": {"$ref": "Node"}}]
        }
    });
    let mut graph = TypeGraph::new();
    let named = graph.intern_named(types.as_object().unwrap()).unwrap();
    let node = named["Node"];

    let signature = format_schema_type(&graph, node);
    assert!(signature.contains(RECURSIVE_MARKER), "got {}", signature);
    assert_eq!(signature, "Null | [Recursive] (optional)");

    let resolved = resolve_type(&graph, node);
    assert!(resolved.nullable);
    assert!(resolved.optional);

    let mut columns = Columns::new();
    columns.insert("parent".to_string(), node);
    let fields = derive_insert_fields(&graph, &columns);
    assert!(!fields[0].required);
}

#[test]
fn test_form_submission_round_trip() {
    let mut graph = TypeGraph::new();
    let columns = todo_columns(&mut graph);
    let fields = derive_insert_fields(&graph, &columns);

    let mut inputs: HashMap<String, RawInput> = HashMap::new();
    inputs.insert("title".to_string(), "Buy milk".into());
    inputs.insert("projectId".to_string(), "p-1".into());
    inputs.insert("priority".to_string(), "high".into());
    inputs.insert("done".to_string(), true.into());
    inputs.insert("attachment".to_string(), "A4DE".into());

    let row = build_insert_row(&fields, &inputs).unwrap();
    assert_eq!(row["title"], CellValue::from("Buy milk"));
    assert_eq!(row["categoryId"], CellValue::Null);
    assert_eq!(row["projectId"], CellValue::from("p-1"));
    assert_eq!(row["priority"], CellValue::from("high"));
    assert_eq!(row["done"], CellValue::Number(1.0));
    assert_eq!(row["attachment"], CellValue::Bytes(vec![0xA4, 0xDE]));
    assert!(!row.contains_key("id"));

    inputs.insert("attachment".to_string(), "410".into());
    let err = build_insert_row(&fields, &inputs).unwrap_err();
    assert!(matches!(err, InsertError::Hex { ref field, .. } if field == "attachment"));

    inputs.remove("title");
    let err = build_insert_row(&fields, &inputs).unwrap_err();
    assert_eq!(err, InsertError::Required { field: "title".to_string() });
}
