//! Backing stores for Capsule.
//!
//! A backing store is a flat, synchronous map from string keys to string
//! values, in the manner of a browser's page-local storage. It knows nothing
//! about prefixes or envelopes; those live one layer up.
//!
//! # Storage Backends
//!
//! All backends implement the [`Storage`] trait:
//!
//! - [`InMemoryStorage`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileStorage`] -- persistent store kept in a single JSON file
//! - [`UnavailableStorage`] -- stands in for a runtime with no storage at all
//!
//! # Design Rules
//!
//! 1. Every operation completes synchronously or fails immediately.
//! 2. Removing an absent key is not an error.
//! 3. A store may refuse a write (quota); the refusal is reported, never hidden.
//! 4. A missing store is reported at first use, never masked.

pub mod error;
pub mod file;
pub mod memory;
pub mod quota;
pub mod traits;
pub mod unavailable;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::InMemoryStorage;
pub use quota::Quota;
pub use traits::Storage;
pub use unavailable::UnavailableStorage;
