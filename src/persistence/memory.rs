//! In-memory key/value storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{KeyValueStorage, StorageError};

/// In-memory storage backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly: clones share the same underlying map, which is how tests
/// simulate a second session over the same durable store. An optional byte
/// quota (sum of key and value lengths) mimics the capacity limit of
/// browser-scoped storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockPoisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned("memory read"))?;
        Ok(entries.len())
    }

    /// Returns `true` when no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockPoisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned("memory read"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("memory write"))?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("memory write"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get() {
        let storage = MemoryStorage::new();
        let Ok(()) = storage.set("k", "v").await else {
            panic!("set failed");
        };
        let Ok(value) = storage.get("k").await else {
            panic!("get failed");
        };
        assert_eq!(value.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let storage = MemoryStorage::new();
        let Ok(value) = storage.get("missing").await else {
            panic!("get failed");
        };
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("missing").await.is_ok());
    }

    #[tokio::test]
    async fn clone_shares_storage() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        let _ = storage.set("k", "shared").await;

        let Ok(value) = clone.get("k").await else {
            panic!("get failed");
        };
        assert_eq!(value.as_deref(), Some("shared"));
        assert_eq!(clone.len().ok(), Some(1));
    }

    #[tokio::test]
    async fn quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(8);
        assert!(storage.set("k", "1234").await.is_ok());

        let result = storage.set("other", "123456").await;
        let Err(StorageError::QuotaExceeded { needed, available }) = result else {
            panic!("expected quota error");
        };
        assert_eq!(needed, 11);
        assert_eq!(available, 3);

        // Overwriting the same key only counts the replacement.
        assert!(storage.set("k", "1234567").await.is_ok());
    }
}
