//! Field decoding.
//!
//! - `layout`: decoder limits
//! - `reader`: bounds-checked byte access
//! - `parser`: byte-order aware decoding of a span into a [`FieldValue`]
//! - `value`: decoded values and the inverse integer encoder
//! - `error`: out-of-bounds and width errors
//!
//! Decoding is a pure function of (buffer, offset, length, field): bounds are
//! checked first, then the field's fixed width, then the byte-order policy
//! selects the interpretation.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod value;

pub use error::{DecodeError, ExpectedWidth};
pub use parser::{decode, decode_at, decode_field};
pub use reader::FieldReader;
pub use value::{DecodedField, FieldValue, encode_uint};
