use catalog::{
    load_products, sample_products, CatalogSource, FileStorage, KeyValueStorage, MemoryStorage,
    ProductStore, SaveOutcome,
};
use chrono::Utc;
use domain::{ProductDraft, ProductStatus};
use std::sync::Arc;
use tempfile::TempDir;

const KEY: &str = "digital-products";

#[test]
fn test_load_missing_returns_seed_and_persists_it() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = ProductStore::new(storage.clone());

    let products = store.load().to_vec();
    assert_eq!(products, sample_products());
    assert!(store.is_loaded());

    let stored = storage.get(KEY).expect("get").expect("seed written back");
    let reparsed: Vec<domain::Product> = serde_json::from_str(&stored).expect("valid json");
    assert_eq!(reparsed.len(), 3);
}

#[test]
fn test_load_corrupt_returns_exact_seed() {
    for corrupt in ["{", "null", "[{\"id\": 5}]", "\"text\""] {
        let storage = MemoryStorage::with_value(KEY, corrupt);
        let loaded = load_products(&storage, KEY);
        assert_eq!(loaded.products.len(), 3, "input {corrupt:?}");
        assert_eq!(loaded.products, sample_products());
        assert!(loaded.source.is_seeded());
    }
}

#[test]
fn test_stored_empty_catalog_is_respected() {
    let storage = MemoryStorage::with_value(KEY, "[]");
    let loaded = load_products(&storage, KEY);
    assert!(loaded.products.is_empty());
    assert_eq!(loaded.source, CatalogSource::Stored);
}

#[test]
fn test_deleting_every_product_is_persisted() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = ProductStore::new(storage.clone());
    store.load();

    for id in ["prod_1", "prod_2", "prod_3"] {
        assert_eq!(store.remove(id), SaveOutcome::Persisted);
    }

    assert!(store.products().is_empty());
    assert_eq!(storage.get(KEY).expect("get").as_deref(), Some("[]"));

    // A fresh session sees the empty catalog, not the samples
    let mut reopened = ProductStore::new(storage);
    assert!(reopened.load().is_empty());
}

#[test]
fn test_mutations_before_load_do_not_clobber_storage() {
    let original = serde_json::to_string(&sample_products()[..1]).expect("serialize");
    let storage = Arc::new(MemoryStorage::with_value(KEY, &original));
    let mut store = ProductStore::new(storage.clone());

    assert_eq!(store.remove("prod_1"), SaveOutcome::NotLoaded);
    assert_eq!(storage.get(KEY).expect("get"), Some(original));
}

#[test]
fn test_new_product_appears_first() {
    let mut store = ProductStore::new(MemoryStorage::new());
    store.load();

    let draft = ProductDraft {
        name: "Widget".to_string(),
        category: "Tool".to_string(),
        price: 9.99,
        ..ProductDraft::new()
    };
    let before = Utc::now();
    let widget = draft.into_product().expect("valid draft");

    assert!(!widget.id.is_empty());
    assert!(widget.created_at >= before);
    assert_eq!(widget.status, ProductStatus::Draft);

    assert!(store.upsert(widget.clone()).is_persisted());
    assert_eq!(store.products().len(), 4);
    assert_eq!(store.products()[0], widget);
}

#[test]
fn test_edit_keeps_created_at_and_order() {
    let mut store = ProductStore::new(MemoryStorage::new());
    store.load();
    let order_before: Vec<String> = store.products().iter().map(|p| p.id.clone()).collect();

    let original = store.get("prod_2").expect("seeded").clone();
    let mut draft = ProductDraft::from_product(&original);
    draft.price = 199.0;
    draft.status = ProductStatus::Archived;
    let edited = draft.into_product().expect("valid draft");

    assert!(store.upsert(edited).is_persisted());

    let order_after: Vec<String> = store.products().iter().map(|p| p.id.clone()).collect();
    assert_eq!(order_before, order_after);

    let stored = store.get("prod_2").expect("still present");
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(stored.price, 199.0);
    assert_eq!(stored.status, ProductStatus::Archived);
}

#[test]
fn test_file_storage_survives_reopen() {
    let dir = TempDir::new().expect("temp dir");

    let mut store = ProductStore::new(FileStorage::new(dir.path()));
    store.load();
    assert!(store.remove("prod_3").is_persisted());

    let mut reopened = ProductStore::new(FileStorage::new(dir.path()));
    let ids: Vec<&str> = reopened.load().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prod_1", "prod_2"]);
}

#[test]
fn test_unreadable_file_falls_back_to_seed() {
    let dir = TempDir::new().expect("temp dir");
    let storage = FileStorage::new(dir.path());
    std::fs::write(dir.path().join("digital-products.json"), "garbage").expect("write");

    let loaded = load_products(&storage, KEY);
    assert_eq!(loaded.products, sample_products());
}

#[test]
fn test_null_price_does_not_discard_stored_catalog() {
    let stored = r#"[
        {"id": "a", "name": "Kept", "category": "Misc", "price": null, "createdAt": "2024-03-01T00:00:00Z"},
        {"id": "b", "name": "Also kept", "category": "Misc", "price": 5, "createdAt": "2024-02-01T00:00:00Z"}
    ]"#;
    let storage = MemoryStorage::with_value(KEY, stored);
    let loaded = load_products(&storage, KEY);

    assert_eq!(loaded.source, CatalogSource::Stored);
    let ids: Vec<&str> = loaded.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(loaded.products[0].price, 0.0);
}
