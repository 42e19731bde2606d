use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StorageError, StorageResult};
use crate::quota::Quota;
use crate::traits::Storage;

/// In-memory, `BTreeMap`-based store.
///
/// Intended for tests and embedding. Entries live behind a `RwLock` so the
/// store can be shared between accessors through an `Arc`. An optional
/// [`Quota`] makes writes fail the way a full browser store does.
pub struct InMemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
    quota: Option<Quota>,
}

impl InMemoryStorage {
    /// Create a new empty store without a capacity limit.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota: None,
        }
    }

    /// Create a new empty store that rejects writes beyond `capacity` bytes.
    pub fn with_quota(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota: Some(Quota::new(capacity)),
        }
    }

    /// Bytes currently used (keys plus values).
    pub fn used_bytes(&self) -> StorageResult<usize> {
        Ok(Quota::used(&*self.read()?))
    }

    /// Remove every entry.
    pub fn clear(&self) -> StorageResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.entries.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.entries.write().map_err(|_| StorageError::LockPoisoned)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.write()?;
        if let Some(quota) = &self.quota {
            quota.check(&entries, key, value)?;
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        Ok(self.write()?.remove(key).is_some())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|e| e.len()).ok();
        f.debug_struct("InMemoryStorage")
            .field("entry_count", &count)
            .field("quota", &self.quota)
            .finish()
    }
}
