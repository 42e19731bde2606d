//! Foundation types for Capsule.
//!
//! Capsule stores values in a flat, string-only key-value store. This crate
//! defines the in-memory shape of a value before it crosses that boundary and
//! the classification that decides whether the value needs type metadata to
//! survive the trip.
//!
//! # Key Types
//!
//! - [`Value`] — Dynamically typed value (JSON-native shapes plus dates)
//! - [`StorableType`] — The closed set of types that can be stored
//! - [`HydrateableType`] — Storable types that are reconstructed on read
//! - [`classify`] / [`narrow_if_hydrateable`] — Type classification rules

pub mod date;
pub mod error;
pub mod json;
pub mod storable;
pub mod value;

pub use date::{date_from_json, date_from_millis, date_to_json};
pub use error::TypeError;
pub use storable::{classify, narrow_if_hydrateable, HydrateableType, StorableType};
pub use value::{Map, Value};
