use std::collections::BTreeMap;

use crate::codec::{AttributeUpdate, AttributeValue};
use crate::store::{Item, ItemStore, KeySelector, MemoryStore, StoreError};

fn key(id: &str) -> KeySelector {
    BTreeMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

fn item(id: &str, age: i64) -> Item {
    BTreeMap::from([
        ("id".to_string(), AttributeValue::S(id.to_string())),
        ("age".to_string(), AttributeValue::N(age.to_string())),
    ])
}

#[test]
fn test_put_and_get() {
    let store = MemoryStore::new();
    store.create_table("people");

    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();
    let fetched = store.get_item("people", &key("abc"), None).unwrap();
    assert_eq!(fetched, Some(item("abc", 30)));

    assert_eq!(store.get_item("people", &key("zzz"), None).unwrap(), None);
}

#[test]
fn test_put_is_insert_if_absent() {
    let store = MemoryStore::new();
    store.create_table("people");

    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();
    let err = store
        .put_item("people", &key("abc"), item("abc", 31))
        .unwrap_err();
    assert!(matches!(err, crate::Error::Store(s) if s.is_conflict()));

    // The original item is untouched.
    let fetched = store.get_item("people", &key("abc"), None).unwrap();
    assert_eq!(fetched, Some(item("abc", 30)));
}

#[test]
fn test_unknown_table() {
    let store = MemoryStore::new();
    let err = store.get_item("nope", &key("abc"), None).unwrap_err();
    assert!(matches!(
        err,
        crate::Error::Store(StoreError::TableNotFound { .. })
    ));
}

#[test]
fn test_update_puts_and_deletes_attributes() {
    let store = MemoryStore::new();
    store.create_table("people");
    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();

    let updates = BTreeMap::from([
        (
            "age".to_string(),
            AttributeUpdate::Put(AttributeValue::N("40".to_string())),
        ),
        (
            "first_name".to_string(),
            AttributeUpdate::Put(AttributeValue::S("peter".to_string())),
        ),
    ]);
    store.update_item("people", &key("abc"), updates).unwrap();

    let fetched = store.get_item("people", &key("abc"), None).unwrap().unwrap();
    assert_eq!(fetched["age"], AttributeValue::N("40".to_string()));
    assert_eq!(fetched["first_name"], AttributeValue::S("peter".to_string()));

    let removal = BTreeMap::from([("first_name".to_string(), AttributeUpdate::Delete)]);
    store.update_item("people", &key("abc"), removal).unwrap();
    let fetched = store.get_item("people", &key("abc"), None).unwrap().unwrap();
    assert!(!fetched.contains_key("first_name"));
}

#[test]
fn test_update_upserts_missing_items() {
    let store = MemoryStore::new();
    store.create_table("people");

    let updates = BTreeMap::from([(
        "age".to_string(),
        AttributeUpdate::Put(AttributeValue::N("30".to_string())),
    )]);
    store.update_item("people", &key("abc"), updates).unwrap();

    let fetched = store.get_item("people", &key("abc"), None).unwrap().unwrap();
    assert_eq!(fetched["id"], AttributeValue::S("abc".to_string()));
    assert_eq!(fetched["age"], AttributeValue::N("30".to_string()));
}

#[test]
fn test_get_with_projection() {
    let store = MemoryStore::new();
    store.create_table("people");
    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();

    let projection = vec!["age".to_string()];
    let fetched = store
        .get_item("people", &key("abc"), Some(&projection))
        .unwrap()
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched["age"], AttributeValue::N("30".to_string()));
}

#[test]
fn test_delete_is_idempotent() {
    let store = MemoryStore::new();
    store.create_table("people");
    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();

    store.delete_item("people", &key("abc")).unwrap();
    assert_eq!(store.get_item("people", &key("abc"), None).unwrap(), None);
    store.delete_item("people", &key("abc")).unwrap();
}

#[test]
fn test_create_table_twice_keeps_items() {
    let store = MemoryStore::new();
    store.create_table("people");
    store.put_item("people", &key("abc"), item("abc", 30)).unwrap();

    store.create_table("people");
    assert_eq!(store.item_count("people"), Some(1));
}
