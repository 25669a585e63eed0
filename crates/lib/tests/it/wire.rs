//! Serialized wire shapes of items and partial updates.

use std::sync::Arc;

use serde_json::json;

use dynadoc::{Document, FieldType, Schema, Value};

fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("people")
            .hash_key("id", FieldType::String)
            .unwrap()
            .field("age", FieldType::Integer)
            .field("tags", FieldType::Set)
            .build()
            .unwrap(),
    )
}

#[test]
fn test_item_wire_shape() {
    let mut doc = Document::new(schema());
    doc.set("id", "abc").unwrap();
    doc.set("age", 30i64).unwrap();
    doc.set(
        "tags",
        Value::List(vec![Value::from("b"), Value::from("a")]),
    )
    .unwrap();

    let item = doc.to_item().unwrap();
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({
            "id": {"s": "abc"},
            "age": {"n": "30"},
            "tags": {"ss": ["a", "b"]},
        })
    );
}

#[test]
fn test_update_wire_shape() {
    let mut doc = Document::new(schema());
    doc.set("id", "abc").unwrap();
    doc.set("age", 30i64).unwrap();
    doc.changes_applied();

    doc.set("age", 40i64).unwrap();
    doc.set("id", "abc").unwrap();

    let updates = doc.diff_for_update().unwrap();
    assert_eq!(
        serde_json::to_value(&updates).unwrap(),
        json!({
            "age": {"action": "PUT", "value": {"n": "40"}},
        })
    );
}

#[test]
fn test_key_selector_wire_shape() {
    let mut doc = Document::new(schema());
    doc.set("id", "abc").unwrap();

    let selector = doc.key_selector().unwrap();
    assert_eq!(
        serde_json::to_value(&selector).unwrap(),
        json!({"id": {"s": "abc"}})
    );
}
