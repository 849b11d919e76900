//! Local key-value persistence backing drafts and the submissions list.
//!
//! The store holds opaque string values under string keys, mirroring the
//! browser storage the intake flow was designed around. Two implementations
//! are provided: an in-memory map for tests and short-lived sessions, and a
//! single-file JSON store for the CLI service.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage abstraction so drafts and submissions can be exercised in
/// isolation from the filesystem.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored payload is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Volatile store used by tests and the demo flow.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store keeping every key in one JSON object, read-modify-write
/// per operation. Concurrent writers race last-writer-wins, which the intake
/// flow accepts.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().expect("storage mutex poisoned");
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("storage mutex poisoned");
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("storage mutex poisoned");
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryKeyValueStore::default();
        assert_eq!(store.get("missing").expect("get"), None);
        store.set("draft:new", "{}").expect("set");
        assert_eq!(store.get("draft:new").expect("get"), Some("{}".to_string()));
        store.remove("draft:new").expect("remove");
        assert_eq!(store.get("draft:new").expect("get"), None);
    }

    #[test]
    fn removing_absent_key_is_a_no_op() {
        let store = MemoryKeyValueStore::default();
        store.remove("never-written").expect("remove");
        store.remove("never-written").expect("remove twice");
    }

    #[test]
    fn file_store_reads_missing_file_as_empty() {
        let path = std::env::temp_dir().join("intake-ai-store-missing-test.json");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("submissions").expect("get"), None);
    }

    #[test]
    fn file_store_persists_between_instances() {
        let path = std::env::temp_dir().join("intake-ai-store-persist-test.json");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::new(&path);
        store.set("submissions", "[]").expect("set");
        drop(store);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("submissions").expect("get"),
            Some("[]".to_string())
        );
        let _ = std::fs::remove_file(&path);
    }
}
