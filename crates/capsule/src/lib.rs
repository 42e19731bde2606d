//! Namespaced, typed storage on top of a flat string key-value store.
//!
//! A [`Capsule`] owns a prefix inside a shared [`Storage`]. Every key it
//! writes is stored as `<prefix>_<key>`, and every value is wrapped in the
//! JSON envelope from [`capsule_codec`] so that structured values and dates
//! come back in the shape they went in.
//!
//! ```
//! use std::sync::Arc;
//! use capsule::{Capsule, InMemoryStorage, Value};
//!
//! let store = Arc::new(InMemoryStorage::new());
//! let mut prefs = Capsule::with_defaults(store.clone(), "prefs", [("theme", Value::from("dark"))])?;
//!
//! prefs.set("size", Value::from(12))?;
//! assert_eq!(prefs.get("theme", Value::Undefined)?, Value::from("dark"));
//! assert!(prefs.has("size")?);
//!
//! prefs.flush()?;
//! assert!(!prefs.has("theme")?);
//! # Ok::<(), capsule::CapsuleError>(())
//! ```

pub mod capsule;
pub mod config;
pub mod error;

pub use capsule::{Capsule, DELIMITER};
pub use config::CapsuleConfig;
pub use error::{CapsuleError, CapsuleResult, SaveCause};

// Re-export the layers a caller needs alongside the accessor.
pub use capsule_codec::{decode, encode, DecodeError, EncodeError, TransformOptions};
pub use capsule_storage::{FileStorage, InMemoryStorage, Storage, StorageError, UnavailableStorage};
pub use capsule_types::{classify, HydrateableType, Map, StorableType, Value};
