//! Product catalog persistence
//!
//! The catalog is a single JSON array stored under one key of a synchronous
//! key-value store. Loading never fails: an absent or unreadable collection
//! is replaced by the sample catalog.
//!
//! ```no_run
//! use catalog::{FileStorage, ProductStore};
//!
//! let mut store = ProductStore::new(FileStorage::new("/tmp/catalog"));
//! for product in store.load() {
//!     println!("{} {}", product.name, product.formatted_price());
//! }
//! ```

pub mod errors;
pub mod seed;
pub mod storage;
pub mod store;

pub use errors::{StorageError, StorageResult};
pub use seed::sample_products;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{load_products, remove, upsert, CatalogSource, LoadedCatalog, ProductStore, SaveOutcome};
