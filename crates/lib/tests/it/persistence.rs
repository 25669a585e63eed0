//! End-to-end document lifecycle through a repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use dynadoc::schema::FieldDef;
use dynadoc::{FieldType, MemoryStore, Repository, Schema, Value};

fn person_repository(store: Arc<MemoryStore>) -> Repository {
    let mut prefs = FieldDef::new("preferences", FieldType::Map);
    prefs.label = Some("User preferences".to_string());

    let schema = Arc::new(
        Schema::builder("people")
            .hash_key("id", FieldType::String)
            .unwrap()
            .field("first_name", FieldType::String)
            .field("age", FieldType::Integer)
            .field("balance", FieldType::Decimal)
            .field_def(prefs)
            .build()
            .unwrap(),
    );
    store.create_table("people");
    Repository::new(schema, store)
}

#[test]
fn test_document_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let repo = person_repository(store.clone());

    // Build: string input coerces to the declared integer type.
    let mut doc = repo.new_document();
    doc.set("id", "person-1").unwrap();
    doc.set("first_name", "peter").unwrap();
    doc.set("age", "30").unwrap();
    assert_eq!(doc.get("age").unwrap(), Some(&Value::Int(30)));
    assert!(doc.is_new());
    assert!(doc.is_changed());

    // First save is a conditional insert.
    repo.save(&mut doc).unwrap();
    assert!(!doc.is_new());
    assert!(!doc.is_changed());
    assert_eq!(store.item_count("people"), Some(1));

    // Partial update: only the changed attribute ships.
    doc.set("age", 31i64).unwrap();
    repo.save(&mut doc).unwrap();

    let found = repo.find("person-1", None).unwrap().unwrap();
    assert_eq!(found.get("age").unwrap(), Some(&Value::Int(31)));
    assert_eq!(
        found.get("first_name").unwrap(),
        Some(&Value::from("peter"))
    );

    // Delete, then re-save re-inserts.
    let mut found = found;
    repo.delete(&mut found).unwrap();
    assert!(repo.find("person-1", None).unwrap().is_none());
    repo.save(&mut found).unwrap();
    assert!(repo.find("person-1", None).unwrap().is_some());
}

#[test]
fn test_exact_decimals_survive_storage() {
    let store = Arc::new(MemoryStore::new());
    let repo = person_repository(store);

    let big = "123456789012345678901234567890.5";
    let mut doc = repo.new_document();
    doc.set("id", "person-2").unwrap();
    doc.set("balance", big).unwrap();
    repo.save(&mut doc).unwrap();

    let found = repo.find("person-2", None).unwrap().unwrap();
    match found.get("balance").unwrap().unwrap() {
        Value::Decimal(n) => assert_eq!(n.as_str(), big),
        other => panic!("expected a decimal, got {other:?}"),
    }
}

#[test]
fn test_nested_attributes_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let repo = person_repository(store);

    let mut inner = BTreeMap::new();
    inner.insert("theme".to_string(), Value::from("dark"));
    inner.insert("retries".to_string(), Value::Int(3));
    let mut prefs = BTreeMap::new();
    prefs.insert("ui".to_string(), Value::Map(inner));

    let mut doc = repo.new_document();
    doc.set("id", "person-3").unwrap();
    doc.set("preferences", Value::Map(prefs.clone())).unwrap();
    repo.save(&mut doc).unwrap();

    let found = repo.find("person-3", None).unwrap().unwrap();
    assert_eq!(
        found.get("preferences").unwrap(),
        Some(&Value::Map(prefs))
    );
}

#[test]
fn test_concurrent_inserts_one_winner() {
    let store = Arc::new(MemoryStore::new());
    let repo = Arc::new(person_repository(store));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let repo = repo.clone();
            std::thread::spawn(move || {
                let mut doc = repo.new_document();
                doc.set("id", "contested").unwrap();
                doc.set("age", i as i64).unwrap();
                repo.save(&mut doc)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(result.as_ref().unwrap_err().is_conflict());
    }
}
