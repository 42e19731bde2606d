use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::date::date_to_json;
use crate::error::TypeError;

/// Insertion-ordered map used for [`Value::Object`].
pub type Map = IndexMap<String, Value>;

/// A dynamically typed value as seen by a Capsule.
///
/// Covers the JSON-native shapes plus the values that need special handling
/// at the storage boundary: dates (valid or not), and shapes that can never be
/// stored (`Undefined` is the absence of a value; `BigInt` and `Symbol` have no
/// JSON mapping at all).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value. Stored as an envelope without a payload.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// A date/time with a valid instant.
    Date(DateTime<Utc>),
    /// A date/time whose instant is not a valid timestamp.
    InvalidDate,
    /// Arbitrary-precision integer. Not storable.
    BigInt(i128),
    /// Unique symbol with an optional description. Not storable.
    Symbol(String),
}

impl Value {
    /// Short lowercase name of the runtime shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Date(_) => "date",
            Value::InvalidDate => "invalid date",
            Value::BigInt(_) => "bigint",
            Value::Symbol(_) => "symbol",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of an object value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(field))
    }

    /// Build a value from any serializable Rust type via its JSON form.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, TypeError> {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Convert this value into a concrete Rust type via its JSON form.
    ///
    /// Dates convert as their ISO-8601 text, so they deserialize into
    /// `chrono::DateTime<Utc>` or `String` fields alike.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, TypeError> {
        let json = self.to_json()?.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Date(dt) => f.write_str(&date_to_json(dt)),
            Value::InvalidDate => f.write_str("Invalid Date"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Symbol(desc) => write!(f, "Symbol({desc})"),
            Value::Array(_) | Value::Object(_) => match self.to_json() {
                Ok(Some(json)) => write!(f, "{json}"),
                _ => write!(f, "[{}]", self.type_name()),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Date(dt)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
