use std::sync::Arc;

use crate::error::StorageResult;

/// A flat, synchronous, string-keyed persistent store.
///
/// Implementations must satisfy these invariants:
/// - `has(k)` is true exactly when `get_item(k)` returns `Some`.
/// - `keys()` enumerates every key currently present, in any order.
/// - `remove_item` on an absent key succeeds and returns `false`.
/// - A rejected `set_item` leaves the previous value (if any) in place.
pub trait Storage: Send + Sync {
    /// Check whether an entry exists for `key`.
    fn has(&self, key: &str) -> StorageResult<bool>;

    /// Read the text stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the entry for `key`. Returns `true` if it existed.
    fn remove_item(&self, key: &str) -> StorageResult<bool>;

    /// Enumerate every key currently present.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Number of entries currently present.
    fn len(&self) -> StorageResult<usize> {
        Ok(self.keys()?.len())
    }

    /// Returns `true` if the store holds no entries.
    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn has(&self, key: &str) -> StorageResult<bool> {
        (**self).has(key)
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}
