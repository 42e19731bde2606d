//! Wire format for Capsule values.
//!
//! Every stored value is wrapped in a JSON envelope:
//!
//! ```text
//! {"__data__": <payload>, "__type__": "<tag>"}
//! ```
//!
//! `__data__` is omitted when the value is undefined. `__type__` is present
//! only for hydrateable types whose transform was requested at encode time.
//! The field names are part of the compatibility surface with data that is
//! already stored and must never change.
//!
//! # Example
//!
//! ```
//! use capsule_codec::{decode, encode, TransformOptions};
//! use capsule_types::Value;
//!
//! let text = encode(&Value::from("foo"), &TransformOptions::none()).unwrap();
//! assert_eq!(text, r#"{"__data__":"foo"}"#);
//! assert_eq!(decode(&text, &TransformOptions::none()).unwrap(), Value::from("foo"));
//! ```

pub mod codec;
pub mod error;
pub mod options;
pub mod wrapped;

pub use codec::{decode, encode};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use options::TransformOptions;
pub use wrapped::{WrappedValue, DATA_FIELD, TYPE_FIELD};
