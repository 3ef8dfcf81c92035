use std::fmt;

use serde::Serialize;

use crate::field::{Endianness, Field};

use super::error::{DecodeError, ExpectedWidth};
use super::layout;

/// Decoded value of a single field.
///
/// Serialized untagged: integers as JSON numbers, text as a string and raw
/// bytes as an array. The JSON form drops the signed/unsigned distinction,
/// so values are write-only; the field's kind tells how to read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Unsigned(value) => Some(*value),
            FieldValue::Signed(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Unsigned(value) => i64::try_from(*value).ok(),
            FieldValue::Signed(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsigned(value) => write!(f, "{value}"),
            FieldValue::Signed(value) => write!(f, "{value}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// A field located in a frame together with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    /// Registry field (serialized as its name).
    pub name: Field,
    /// Byte offset within the frame.
    pub offset: usize,
    /// Width in bytes.
    pub width: usize,
    pub value: FieldValue,
}

/// Encodes `value` into `width` bytes using the given byte order.
///
/// This is the inverse of numeric decoding.
///
/// # Examples
/// ```
/// use ptidecode_core::{Endianness, encode_uint};
///
/// assert_eq!(encode_uint(0x0102, 2, Endianness::Big).unwrap(), vec![0x01, 0x02]);
/// assert_eq!(encode_uint(0x0102, 2, Endianness::Little).unwrap(), vec![0x02, 0x01]);
/// ```
pub fn encode_uint(value: u64, width: usize, endianness: Endianness) -> Result<Vec<u8>, DecodeError> {
    if !(1..=layout::MAX_INT_WIDTH).contains(&width) {
        return Err(DecodeError::InvalidWidth {
            field: "integer".to_string(),
            actual: width,
            expected: ExpectedWidth::Between(1, layout::MAX_INT_WIDTH),
        });
    }
    if width < layout::MAX_INT_WIDTH && value >> (width * 8) != 0 {
        return Err(DecodeError::ValueTooWide { value, width });
    }

    let be = value.to_be_bytes();
    let mut bytes = be[layout::MAX_INT_WIDTH - width..].to_vec();
    if endianness == Endianness::Little {
        bytes.reverse();
    }
    Ok(bytes)
}
