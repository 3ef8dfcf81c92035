use thiserror::Error;

use crate::decode::DecodeError;

/// Errors returned by DCH frame parsing.
///
/// # Examples
/// ```
/// use ptidecode_core::protocols::dch::error::DchError;
///
/// let err = DchError::UnsupportedVersion { version: 9 };
/// assert!(err.to_string().contains("unsupported DCH version"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DchError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("length mismatch: header declares {declared} bytes, frame holds {actual}")]
    LengthMismatch { declared: u64, actual: usize },
    #[error("missing end marker: found {found:#04x}")]
    MissingEndMarker { found: u8 },
    #[error("unsupported DCH version: {version}")]
    UnsupportedVersion { version: u64 },
    #[error("unexpected value for {field}")]
    UnexpectedValue { field: &'static str },
    #[error("field decode failed: {0}")]
    Decode(#[from] DecodeError),
}
