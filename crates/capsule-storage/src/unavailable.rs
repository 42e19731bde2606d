use crate::error::{StorageError, StorageResult};
use crate::traits::Storage;

/// A store for runtimes without persistent storage.
///
/// Every operation fails with [`StorageError::Unavailable`], so the absence
/// surfaces at the first call that touches the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn has(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::Unavailable)
    }

    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::Unavailable)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Err(StorageError::Unavailable)
    }
}
