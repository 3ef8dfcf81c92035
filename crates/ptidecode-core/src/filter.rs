//! Name-based frame filters.
//!
//! A filter names a registry field and optionally a value:
//! `mac.dest_pan`, `mac.dest_pan==0xabcd`, `dch.type!=3`. Integers accept
//! decimal or `0x` hex, text compares exactly, byte sequences compare as a
//! lowercase hex string.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::decode::FieldValue;
use crate::field::Field;
use crate::protocols::dch::DchFrame;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("empty filter expression")]
    Empty,
    #[error("unknown field '{name}'")]
    UnknownField { name: String },
    #[error("missing value in filter '{expr}'")]
    MissingValue { expr: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Present,
    Equals(String),
    NotEquals(String),
}

/// A single field predicate over a decoded frame.
///
/// # Examples
/// ```
/// use ptidecode_core::{Field, FieldFilter};
///
/// let filter = FieldFilter::parse("udp.dest_port==0x4d2").unwrap();
/// assert_eq!(filter.field(), Field::UdpDestPort);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    field: Field,
    op: FilterOp,
}

impl FieldFilter {
    pub fn parse(expr: &str) -> Result<Self, FilterError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(FilterError::Empty);
        }

        let (name, op) = if let Some((name, value)) = expr.split_once("==") {
            (name, Some(FilterOp::Equals(value.trim().to_string())))
        } else if let Some((name, value)) = expr.split_once("!=") {
            (name, Some(FilterOp::NotEquals(value.trim().to_string())))
        } else {
            (expr, None)
        };

        if let Some(FilterOp::Equals(value) | FilterOp::NotEquals(value)) = &op {
            if value.is_empty() {
                return Err(FilterError::MissingValue {
                    expr: expr.to_string(),
                });
            }
        }

        let name = name.trim();
        let field = Field::from_name(name).ok_or_else(|| FilterError::UnknownField {
            name: name.to_string(),
        })?;

        Ok(Self {
            field,
            op: op.unwrap_or(FilterOp::Present),
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn op(&self) -> &FilterOp {
        &self.op
    }

    pub fn matches(&self, frame: &DchFrame) -> bool {
        let mut values = frame
            .fields
            .iter()
            .filter(|decoded| decoded.name == self.field)
            .map(|decoded| &decoded.value)
            .peekable();

        match &self.op {
            FilterOp::Present => values.peek().is_some(),
            FilterOp::Equals(expected) => values.any(|value| value_matches(value, expected)),
            FilterOp::NotEquals(expected) => {
                values.peek().is_some() && !values.any(|value| value_matches(value, expected))
            }
        }
    }
}

impl FromStr for FieldFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldFilter::parse(s)
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            FilterOp::Present => write!(f, "{}", self.field),
            FilterOp::Equals(value) => write!(f, "{}=={}", self.field, value),
            FilterOp::NotEquals(value) => write!(f, "{}!={}", self.field, value),
        }
    }
}

/// True when every filter matches (an empty set matches everything).
pub fn matches_all(filters: &[FieldFilter], frame: &DchFrame) -> bool {
    filters.iter().all(|filter| filter.matches(frame))
}

fn value_matches(value: &FieldValue, expected: &str) -> bool {
    match value {
        FieldValue::Unsigned(actual) => parse_uint(expected) == Some(*actual),
        FieldValue::Signed(actual) => parse_int(expected) == Some(*actual),
        FieldValue::Text(actual) => actual == expected,
        FieldValue::Bytes(_) => {
            let expected = strip_hex_prefix(expected).unwrap_or(expected);
            value.to_string().eq_ignore_ascii_case(expected)
        }
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn parse_uint(text: &str) -> Option<u64> {
    match strip_hex_prefix(text) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn parse_int(text: &str) -> Option<i64> {
    match text.strip_prefix('-') {
        Some(rest) => parse_uint(rest)
            .and_then(|magnitude| i64::try_from(magnitude).ok())
            .map(|magnitude| -magnitude),
        None => parse_uint(text).and_then(|value| i64::try_from(value).ok()),
    }
}
