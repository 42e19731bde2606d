use capsule_types::HydrateableType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Envelope field holding the payload.
pub const DATA_FIELD: &str = "__data__";

/// Envelope field holding the hydrateable type tag.
pub const TYPE_FIELD: &str = "__type__";

/// The envelope written to the store for one value.
///
/// A missing `data` field means the value was undefined; a present JSON
/// `null` is a stored null. The tag is kept as raw JSON so that a tag of any
/// shape still reads; only string tags can name a hydrateable type. Field
/// order on the wire is `__data__` first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WrappedValue {
    #[serde(
        rename = "__data__",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<JsonValue>,

    #[serde(rename = "__type__", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<JsonValue>,
}

impl WrappedValue {
    pub fn new(data: Option<JsonValue>, tag: Option<HydrateableType>) -> Self {
        Self {
            data,
            type_tag: tag.map(|t| JsonValue::String(t.as_str().to_string())),
        }
    }

    /// The hydrateable type named by the tag. Unknown or non-string tags
    /// yield `None`.
    pub fn hydrateable(&self) -> Option<HydrateableType> {
        self.type_tag
            .as_ref()
            .and_then(JsonValue::as_str)
            .and_then(HydrateableType::from_tag)
    }
}

/// Keeps an explicit `null` payload distinct from an absent one.
fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}
