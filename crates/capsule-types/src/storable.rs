//! Storable-type classification.
//!
//! Every value written to a Capsule is first classified into one of a fixed
//! set of [`StorableType`]s. Values with no classification can never be
//! stored. The subset of types that lose their identity when turned into text
//! are [`HydrateableType`]s; those get a type tag in the stored envelope so
//! that readers can reconstruct them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The closed set of types a Capsule can store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorableType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
    Date,
}

impl StorableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorableType::String => "string",
            StorableType::Number => "number",
            StorableType::Boolean => "boolean",
            StorableType::Object => "object",
            StorableType::Array => "array",
            StorableType::Null => "null",
            StorableType::Date => "date",
        }
    }
}

impl fmt::Display for StorableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storable types that need a text transform and can be rebuilt on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrateableType {
    Date,
}

impl HydrateableType {
    /// Every hydrateable type.
    pub const ALL: &'static [HydrateableType] = &[HydrateableType::Date];

    /// The tag written into the `__type__` field of the stored envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            HydrateableType::Date => "date",
        }
    }

    /// Look up a hydrateable type by its envelope tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.as_str() == tag)
    }
}

impl fmt::Display for HydrateableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HydrateableType> for StorableType {
    fn from(ty: HydrateableType) -> Self {
        match ty {
            HydrateableType::Date => StorableType::Date,
        }
    }
}

/// Classify a value into its storable type.
///
/// Returns `None` when the value cannot be stored: `Undefined`, a date whose
/// instant is invalid, and shapes with no mapping (`BigInt`, `Symbol`).
/// Dates are recognized before the generic shapes and arrays before objects.
pub fn classify(value: &Value) -> Option<StorableType> {
    match value {
        Value::Undefined => None,
        Value::Null => Some(StorableType::Null),
        Value::Date(_) => Some(StorableType::Date),
        Value::InvalidDate => None,
        Value::Array(_) => Some(StorableType::Array),
        Value::String(_) => Some(StorableType::String),
        Value::Number(_) => Some(StorableType::Number),
        Value::Bool(_) => Some(StorableType::Boolean),
        Value::Object(_) => Some(StorableType::Object),
        Value::BigInt(_) | Value::Symbol(_) => None,
    }
}

/// Return the hydrateable counterpart of `ty`, if it has one.
pub fn narrow_if_hydrateable(ty: StorableType) -> Option<HydrateableType> {
    HydrateableType::ALL
        .iter()
        .copied()
        .find(|h| StorableType::from(*h) == ty)
}
