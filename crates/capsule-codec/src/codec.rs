use capsule_types::{
    classify, date_from_json, date_to_json, narrow_if_hydrateable, HydrateableType, Value,
};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::options::TransformOptions;
use crate::wrapped::WrappedValue;

/// Encode a value into envelope text.
///
/// `Undefined` encodes to an envelope without a payload (`{}`). Any other
/// value must classify as a storable type. A hydrateable value whose
/// transform is requested is written as text and tagged; otherwise the
/// payload keeps its JSON shape and no tag is written.
pub fn encode(value: &Value, options: &TransformOptions) -> EncodeResult<String> {
    let tag = if value.is_undefined() {
        None
    } else {
        let ty = classify(value).ok_or(EncodeError::Unrepresentable {
            type_name: value.type_name(),
        })?;
        narrow_if_hydrateable(ty).filter(|h| options.transforms(*h))
    };

    let data = match (tag, value) {
        (Some(HydrateableType::Date), Value::Date(dt)) => Some(JsonValue::String(date_to_json(dt))),
        _ => value.to_json()?,
    };

    let text = serde_json::to_string(&WrappedValue::new(data, tag))?;
    trace!(type_name = value.type_name(), tagged = tag.is_some(), "encoded value");
    Ok(text)
}

/// Decode envelope text back into a value.
///
/// A missing payload decodes to `Undefined`. A `date` tag is honored only when
/// the date transform is requested; otherwise the payload is returned as
/// stored. Unknown tags are ignored.
pub fn decode(text: &str, options: &TransformOptions) -> DecodeResult<Value> {
    let raw: JsonValue = serde_json::from_str(text)?;
    if !raw.is_object() {
        return Err(DecodeError::Malformed(format!(
            "expected a JSON object, found `{raw}`"
        )));
    }
    let wrapped: WrappedValue = serde_json::from_value(raw)?;

    let hydrate = wrapped.hydrateable().filter(|h| options.transforms(*h));
    let Some(data) = wrapped.data else {
        return Ok(Value::Undefined);
    };

    match (hydrate, data) {
        (Some(HydrateableType::Date), JsonValue::String(iso)) => {
            Ok(Value::Date(date_from_json(&iso)?))
        }
        (Some(HydrateableType::Date), other) => Err(DecodeError::Malformed(format!(
            "date payload must be ISO-8601 text, found `{other}`"
        ))),
        (None, data) => Ok(Value::from(data)),
    }
}
