//! Field naming and byte-order metadata.
//!
//! A decodable field is anything implementing [`FieldName`]: it has a
//! filterable name and declares how its bytes are ordered. The known PTI
//! vocabulary is the closed [`Field`] enum in `registry`; downstream code may
//! implement the trait for its own field types.
//!
//! Invariants:
//! - `name()` is never empty and is unique within a vocabulary.
//! - `endianness()` is total: fields without a byte order report
//!   [`ByteOrder::Unspecified`] instead of failing.
//! - Metadata is static and never changes at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod registry;

pub use registry::Field;

/// Byte order of a multi-byte numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

/// Byte-order policy declared by a field.
///
/// `Unspecified` marks fields whose interpretation does not depend on byte
/// order (single bytes, strings, opaque payloads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Big,
    Little,
    Unspecified,
}

impl ByteOrder {
    /// Returns the concrete endianness, if the field prescribes one.
    ///
    /// # Examples
    /// ```
    /// use ptidecode_core::{ByteOrder, Endianness};
    ///
    /// assert_eq!(ByteOrder::Big.endianness(), Some(Endianness::Big));
    /// assert_eq!(ByteOrder::Unspecified.endianness(), None);
    /// ```
    pub fn endianness(self) -> Option<Endianness> {
        match self {
            ByteOrder::Big => Some(Endianness::Big),
            ByteOrder::Little => Some(Endianness::Little),
            ByteOrder::Unspecified => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrder::Big => "big",
            ByteOrder::Little => "little",
            ByteOrder::Unspecified => "unspecified",
        }
    }
}

impl From<Endianness> for ByteOrder {
    fn from(value: Endianness) -> Self {
        match value {
            Endianness::Big => ByteOrder::Big,
            Endianness::Little => ByteOrder::Little,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the bytes of a field are interpreted once extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Unsigned,
    Signed,
    Text,
    Bytes,
}

impl FieldKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Unsigned | FieldKind::Signed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Unsigned => "unsigned",
            FieldKind::Signed => "signed",
            FieldKind::Text => "text",
            FieldKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability set of a decodable field.
///
/// Only `name` is required; the remaining accessors default to an unsigned,
/// variable-width field with no byte order.
///
/// # Examples
/// ```
/// use ptidecode_core::{ByteOrder, FieldName};
///
/// struct Opaque;
///
/// impl FieldName for Opaque {
///     fn name(&self) -> &str {
///         "vendor.opaque"
///     }
/// }
///
/// assert_eq!(Opaque.endianness(), ByteOrder::Unspecified);
/// assert_eq!(Opaque.fixed_width(), None);
/// ```
pub trait FieldName {
    /// Display and filter name of the field.
    fn name(&self) -> &str;

    /// Declared byte order.
    fn endianness(&self) -> ByteOrder {
        ByteOrder::Unspecified
    }

    fn kind(&self) -> FieldKind {
        FieldKind::Unsigned
    }

    /// Width in bytes for fixed-width fields.
    fn fixed_width(&self) -> Option<usize> {
        None
    }
}

impl<T: FieldName + ?Sized> FieldName for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn endianness(&self) -> ByteOrder {
        (**self).endianness()
    }

    fn kind(&self) -> FieldKind {
        (**self).kind()
    }

    fn fixed_width(&self) -> Option<usize> {
        (**self).fixed_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl FieldName for Bare {
        fn name(&self) -> &str {
            "bare"
        }
    }

    #[test]
    fn defaults_are_unspecified_unsigned_variable() {
        assert_eq!(Bare.endianness(), ByteOrder::Unspecified);
        assert_eq!(Bare.kind(), FieldKind::Unsigned);
        assert_eq!(Bare.fixed_width(), None);
    }

    #[test]
    fn byte_order_from_endianness() {
        assert_eq!(ByteOrder::from(Endianness::Big), ByteOrder::Big);
        assert_eq!(ByteOrder::from(Endianness::Little), ByteOrder::Little);
        assert_eq!(ByteOrder::Little.endianness(), Some(Endianness::Little));
    }

    fn describe<F: FieldName>(field: F) -> (String, ByteOrder, Option<usize>) {
        (field.name().to_string(), field.endianness(), field.fixed_width())
    }

    #[test]
    fn reference_forwards_metadata() {
        let field = Field::UdpSrcPort;
        let (name, order, width) = describe(&field);
        assert_eq!(name, "udp.src_port");
        assert_eq!(order, ByteOrder::Big);
        assert_eq!(width, Some(2));
    }
}
