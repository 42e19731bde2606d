use std::path::PathBuf;

/// Errors from backing store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The write would take the store past its capacity.
    #[error("quota exceeded writing {key}: {needed} bytes needed, {capacity} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },

    /// No backing store exists in this runtime.
    #[error("backing store is unavailable")]
    Unavailable,

    /// The persisted store could not be parsed.
    #[error("corrupt store file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// I/O error from a persistent backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
