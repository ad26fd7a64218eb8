use crate::errors::{StorageError, StorageResult};
use crate::seed::sample_products;
use crate::storage::KeyValueStorage;
use common::DEFAULT_STORAGE_KEY;
use domain::Product;
use tracing::{debug, error, info, warn};

/// Where a loaded collection came from
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Stored,
    /// Nothing was stored yet
    SeededMissing,
    /// A value existed but could not be read or parsed
    SeededUnreadable(String),
}

impl CatalogSource {
    pub fn is_seeded(&self) -> bool {
        !matches!(self, CatalogSource::Stored)
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

/// Result of a write-back. Failures are logged, never raised.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum SaveOutcome {
    Persisted,
    /// The collection has not been loaded yet, writing would clobber it
    NotLoaded,
    Failed(String),
}

impl SaveOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SaveOutcome::Persisted)
    }
}

/// Read the collection stored under `key`, falling back to the sample catalog.
///
/// Never fails. A stored empty array is returned as an empty catalog.
pub fn load_products<S: KeyValueStorage + ?Sized>(storage: &S, key: &str) -> LoadedCatalog {
    match read_collection(storage, key) {
        Ok(Some(products)) => {
            debug!(key, count = products.len(), "Loaded stored catalog");
            LoadedCatalog {
                products,
                source: CatalogSource::Stored,
            }
        }
        Ok(None) => {
            info!(key, "No stored catalog, using sample products");
            LoadedCatalog {
                products: sample_products(),
                source: CatalogSource::SeededMissing,
            }
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read stored catalog, using sample products");
            LoadedCatalog {
                products: sample_products(),
                source: CatalogSource::SeededUnreadable(e.to_string()),
            }
        }
    }
}

fn read_collection<S: KeyValueStorage + ?Sized>(
    storage: &S,
    key: &str,
) -> StorageResult<Option<Vec<Product>>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Replace the product with the same id in place, or insert it and re-sort
/// the collection newest first.
pub fn upsert(mut existing: Vec<Product>, product: Product) -> Vec<Product> {
    if let Some(slot) = existing.iter_mut().find(|p| p.id == product.id) {
        *slot = product;
        return existing;
    }

    existing.push(product);
    // Stable sort keeps equal timestamps in insertion order
    existing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    existing
}

/// Drop the product with `id`. Absent ids leave the collection unchanged.
pub fn remove(existing: Vec<Product>, id: &str) -> Vec<Product> {
    existing.into_iter().filter(|p| p.id != id).collect()
}

/// Owns the in-memory collection and writes it back after every mutation.
///
/// Writes are gated on an explicit `loaded` flag rather than on the
/// collection being non-empty, so an emptied catalog is still persisted
/// while a store that was never loaded never overwrites stored data.
pub struct ProductStore<S> {
    storage: S,
    key: String,
    products: Vec<Product>,
    loaded: bool,
}

impl<S: KeyValueStorage> ProductStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            products: Vec::new(),
            loaded: false,
        }
    }

    /// Load the collection. A seeded fallback is written back immediately.
    pub fn load(&mut self) -> &[Product] {
        let LoadedCatalog { products, source } = load_products(&self.storage, &self.key);
        self.products = products;
        self.loaded = true;

        if source.is_seeded() {
            let outcome = self.save();
            debug!(?outcome, "Wrote sample catalog back to storage");
        }

        &self.products
    }

    pub fn save(&self) -> SaveOutcome {
        if !self.loaded {
            debug!(key = %self.key, "Catalog not loaded yet, skipping save");
            return SaveOutcome::NotLoaded;
        }

        match self.write() {
            Ok(()) => {
                debug!(key = %self.key, count = self.products.len(), "Catalog saved");
                SaveOutcome::Persisted
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to save catalog");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    fn write(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.products)?;
        self.storage.set(&self.key, &json)
    }

    pub fn upsert(&mut self, product: Product) -> SaveOutcome {
        info!(product_id = %product.id, name = %product.name, "Saving product");
        self.products = upsert(std::mem::take(&mut self.products), product);
        self.save()
    }

    pub fn remove(&mut self, id: &str) -> SaveOutcome {
        let before = self.products.len();
        self.products = remove(std::mem::take(&mut self.products), id);
        if self.products.len() == before {
            debug!(product_id = id, "Delete requested for unknown product");
        } else {
            info!(product_id = id, "Product deleted");
        }
        self.save()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};
    use domain::ProductStatus;

    fn product(id: &str, minutes: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            category: "Test".to_string(),
            price: 1.0,
            status: ProductStatus::Draft,
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let existing = vec![product("a", 3), product("b", 2), product("c", 1)];

        let mut edited = product("b", 2);
        edited.name = "Renamed".to_string();
        let result = upsert(existing, edited);

        assert_eq!(ids(&result), vec!["a", "b", "c"]);
        assert_eq!(result[1].name, "Renamed");
    }

    #[test]
    fn test_upsert_inserts_newest_first() {
        let existing = vec![product("a", 3), product("c", 1)];
        let result = upsert(existing, product("b", 2));
        assert_eq!(ids(&result), vec!["a", "b", "c"]);

        let result = upsert(result, product("z", 10));
        assert_eq!(ids(&result), vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let existing = vec![product("a", 2), product("b", 1)];
        let result = remove(existing.clone(), "nope");
        assert_eq!(result, existing);

        let result = remove(result, "a");
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_load_corrupt_falls_back_to_seed() {
        let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, "{not json");
        let loaded = load_products(&storage, DEFAULT_STORAGE_KEY);

        assert_eq!(loaded.products, sample_products());
        assert!(matches!(loaded.source, CatalogSource::SeededUnreadable(_)));
    }

    #[test]
    fn test_save_before_load_is_skipped() {
        let store = ProductStore::new(MemoryStorage::new());
        assert_eq!(store.save(), SaveOutcome::NotLoaded);
        assert!(store.storage().is_empty());
    }
}
