use thiserror::Error;

/// Errors produced by value conversions.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("value of type {type_name} has no storable representation")]
    Unrepresentable { type_name: &'static str },

    #[error("non-finite number {0} cannot be represented as JSON")]
    NonFinite(f64),

    #[error("invalid date text: {0}")]
    InvalidDate(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
