use capsule_types::TypeError;

/// Errors raised while turning a value into wire text.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The value's type has no storable representation.
    #[error("cannot encode value of type {type_name}")]
    Unrepresentable { type_name: &'static str },

    /// A nested part of the value has no JSON form.
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading wire text back into a value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The text is not JSON.
    #[error("malformed wire text: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is JSON but not a valid envelope.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// A payload could not be rebuilt into its tagged type.
    #[error(transparent)]
    Type(#[from] TypeError),
}

pub type EncodeResult<T> = Result<T, EncodeError>;

pub type DecodeResult<T> = Result<T, DecodeError>;
