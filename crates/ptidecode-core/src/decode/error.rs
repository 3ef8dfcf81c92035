use std::fmt;

use thiserror::Error;

/// Width a field was expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedWidth {
    Exactly(usize),
    Between(usize, usize),
}

impl fmt::Display for ExpectedWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedWidth::Exactly(width) => write!(f, "{width}"),
            ExpectedWidth::Between(min, max) => write!(f, "{min}..={max}"),
        }
    }
}

/// Errors returned by field decoding and encoding.
///
/// # Examples
/// ```
/// use ptidecode_core::DecodeError;
///
/// let err = DecodeError::OutOfBounds { offset: 1, length: 2, available: 2 };
/// assert!(err.to_string().contains("out of bounds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("span out of bounds: offset {offset} + length {length} exceeds {available} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
    #[error("invalid width for {field}: got {actual} bytes, expected {expected}")]
    InvalidWidth {
        field: String,
        actual: usize,
        expected: ExpectedWidth,
    },
    #[error("value {value:#x} does not fit in {width} bytes")]
    ValueTooWide { value: u64, width: usize },
}
