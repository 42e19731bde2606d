use std::collections::BTreeMap;

use crate::error::{StorageError, StorageResult};

/// Byte capacity for a store, counted as key length plus value length of
/// every entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quota {
    pub capacity: usize,
}

impl Quota {
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Bytes used by `entries`.
    pub fn used(entries: &BTreeMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Check that writing `value` under `key` fits.
    pub fn check(
        &self,
        entries: &BTreeMap<String, String>,
        key: &str,
        value: &str,
    ) -> StorageResult<()> {
        let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
        let needed = Self::used(entries) - replaced + key.len() + value.len();
        if needed > self.capacity {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
