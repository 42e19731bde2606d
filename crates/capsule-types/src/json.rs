//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! Follows JSON text semantics: nested dates become ISO-8601 strings, an
//! undefined object field is dropped, an undefined array element becomes
//! `null`. Shapes with no JSON mapping are errors rather than silently lost.

use serde_json::{Number, Value as JsonValue};

use crate::date::date_to_json;
use crate::error::TypeError;
use crate::value::{Map, Value};

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Value {
    /// Convert to a JSON value.
    ///
    /// Returns `Ok(None)` for [`Value::Undefined`], which has no JSON form.
    pub fn to_json(&self) -> Result<Option<JsonValue>, TypeError> {
        let json = match self {
            Value::Undefined => return Ok(None),
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => number_to_json(*n)?,
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Date(dt) => JsonValue::String(date_to_json(dt)),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_json()?.unwrap_or(JsonValue::Null));
                }
                JsonValue::Array(out)
            }
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, field) in map {
                    if let Some(json) = field.to_json()? {
                        out.insert(key.clone(), json);
                    }
                }
                JsonValue::Object(out)
            }
            Value::InvalidDate | Value::BigInt(_) | Value::Symbol(_) => {
                return Err(TypeError::Unrepresentable {
                    type_name: self.type_name(),
                })
            }
        };
        Ok(Some(json))
    }
}

/// Integral numbers are written without a fractional part (`5`, not `5.0`).
fn number_to_json(n: f64) -> Result<JsonValue, TypeError> {
    if !n.is_finite() {
        return Err(TypeError::NonFinite(n));
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return Ok(JsonValue::from(n as i64));
    }
    Number::from_f64(n)
        .map(JsonValue::Number)
        .ok_or(TypeError::NonFinite(n))
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}
