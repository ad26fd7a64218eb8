//! Key-value storage backends
//!
//! Values are opaque strings addressed by a key, mirroring a browser's local
//! storage. Access is synchronous.

use crate::errors::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub trait KeyValueStorage: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(key, e))?;

        // Write-then-rename so a crash never leaves a half-written collection
        let tmp_path = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(|e| io_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| io_error(key, e))?;

        debug!(key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

/// Process-local storage, used in tests and for throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .slots
            .write()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.slots.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").expect("get"), None);

        storage.set("k", "v").expect("set");
        assert_eq!(storage.get("k").expect("get").as_deref(), Some("v"));

        storage.remove("k").expect("remove");
        storage.remove("k").expect("removing twice is fine");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("digital-products").expect("get"), None);
    }

    #[test]
    fn test_file_storage_creates_directory_and_overwrites() {
        let dir = TempDir::new().expect("temp dir");
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set("digital-products", "[1]").expect("first write");
        storage.set("digital-products", "[2]").expect("second write");

        let path = storage.path_for("digital-products").expect("path");
        assert!(path.ends_with("digital-products.json"));
        assert_eq!(fs::read_to_string(path).expect("read"), "[2]");

        // No temp file is left behind
        let leftovers = fs::read_dir(storage.root())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = TempDir::new().expect("temp dir");
        let storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(storage.set(key, "x"), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
