use capsule_codec::{DecodeError, EncodeError};
use capsule_storage::StorageError;
use thiserror::Error;

/// Why a write did not land.
#[derive(Debug, Error)]
pub enum SaveCause {
    /// The value has no wire representation.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The backing store rejected the write (commonly: full).
    #[error("store error: {0}")]
    Store(#[from] StorageError),
}

/// Errors from accessor operations.
///
/// Every variant names the owning prefix, and the per-key ones the key.
#[derive(Debug, Error)]
pub enum CapsuleError {
    #[error("Capsule ({prefix}) failed to save '{{ {key}: {value} }}'")]
    Save {
        prefix: String,
        key: String,
        /// Rendering of the value that was being written.
        value: String,
        #[source]
        source: SaveCause,
    },

    #[error("Capsule ({prefix}) could not load the item with key: {key}")]
    Load {
        prefix: String,
        key: String,
        #[source]
        source: DecodeError,
    },

    #[error("Capsule ({prefix}) storage error: {source}")]
    Storage {
        prefix: String,
        #[source]
        source: StorageError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CapsuleError {
    /// The prefix of the accessor that raised the error, if any.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            CapsuleError::Save { prefix, .. }
            | CapsuleError::Load { prefix, .. }
            | CapsuleError::Storage { prefix, .. } => Some(prefix),
            CapsuleError::Config(_) => None,
        }
    }

    /// The key involved, for per-key failures.
    pub fn key(&self) -> Option<&str> {
        match self {
            CapsuleError::Save { key, .. } | CapsuleError::Load { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Result alias for accessor operations.
pub type CapsuleResult<T> = Result<T, CapsuleError>;
