use crate::field::{Endianness, Field, FieldKind, FieldName};

use super::error::{DecodeError, ExpectedWidth};
use super::layout;
use super::reader::FieldReader;
use super::value::{DecodedField, FieldValue};

/// Decodes `length` bytes at `offset` according to the field's metadata.
///
/// Big and little endian fields are read as integers (most or least
/// significant byte first). Fields without a byte order are kept as the
/// original byte sequence, except single-byte numeric fields and text.
///
/// # Examples
/// ```
/// use ptidecode_core::{Field, FieldValue, decode};
///
/// let value = decode(&[0x01, 0x02], 0, 2, &Field::UdpSrcPort).unwrap();
/// assert_eq!(value, FieldValue::Unsigned(258));
///
/// let value = decode(&[0x01, 0x02], 0, 2, &Field::MacDestPan).unwrap();
/// assert_eq!(value, FieldValue::Unsigned(513));
/// ```
pub fn decode<F: FieldName + ?Sized>(
    buffer: &[u8],
    offset: usize,
    length: usize,
    field: &F,
) -> Result<FieldValue, DecodeError> {
    let reader = FieldReader::new(buffer);
    let bytes = reader.read_slice(offset, length)?;

    if let Some(expected) = field.fixed_width() {
        if expected != length {
            return Err(invalid_width(field, length, ExpectedWidth::Exactly(expected)));
        }
    }

    let kind = field.kind();
    if kind.is_numeric() && !(1..=layout::MAX_INT_WIDTH).contains(&length) {
        let ordered = field.endianness().endianness().is_some();
        if ordered || length == 0 {
            return Err(invalid_width(
                field,
                length,
                ExpectedWidth::Between(1, layout::MAX_INT_WIDTH),
            ));
        }
    }

    let value = match (field.endianness().endianness(), kind) {
        (Some(endianness), FieldKind::Unsigned) => {
            FieldValue::Unsigned(read_uint(&reader, offset, length, endianness)?)
        }
        (Some(endianness), FieldKind::Signed) => {
            let raw = read_uint(&reader, offset, length, endianness)?;
            FieldValue::Signed(sign_extend(raw, length))
        }
        (_, FieldKind::Text) => FieldValue::Text(read_text(bytes)),
        (_, FieldKind::Bytes) => FieldValue::Bytes(bytes.to_vec()),
        (None, FieldKind::Unsigned) if length == 1 => FieldValue::Unsigned(u64::from(bytes[0])),
        (None, FieldKind::Signed) if length == 1 => FieldValue::Signed(i64::from(bytes[0] as i8)),
        (None, FieldKind::Unsigned | FieldKind::Signed) => FieldValue::Bytes(bytes.to_vec()),
    };
    Ok(value)
}

/// Decodes a registry field and records where it was found.
pub fn decode_field(
    buffer: &[u8],
    offset: usize,
    length: usize,
    field: Field,
) -> Result<DecodedField, DecodeError> {
    let value = decode(buffer, offset, length, &field)?;
    Ok(DecodedField {
        name: field,
        offset,
        width: length,
        value,
    })
}

/// Decodes a field using its own width; variable-width fields consume the
/// rest of the buffer.
pub fn decode_at(buffer: &[u8], offset: usize, field: Field) -> Result<DecodedField, DecodeError> {
    let length = match field.fixed_width() {
        Some(width) => width,
        None => {
            if offset > buffer.len() {
                return Err(DecodeError::OutOfBounds {
                    offset,
                    length: 0,
                    available: buffer.len(),
                });
            }
            buffer.len() - offset
        }
    };
    decode_field(buffer, offset, length, field)
}

fn read_uint(
    reader: &FieldReader<'_>,
    offset: usize,
    length: usize,
    endianness: Endianness,
) -> Result<u64, DecodeError> {
    match endianness {
        Endianness::Big => reader.read_uint_be(offset, length),
        Endianness::Little => reader.read_uint_le(offset, length),
    }
}

fn sign_extend(raw: u64, width: usize) -> i64 {
    let shift = 64 - (width as u32) * 8;
    ((raw << shift) as i64) >> shift
}

fn read_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

fn invalid_width<F: FieldName + ?Sized>(
    field: &F,
    actual: usize,
    expected: ExpectedWidth,
) -> DecodeError {
    DecodeError::InvalidWidth {
        field: field.name().to_string(),
        actual,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::value::encode_uint;
    use crate::field::ByteOrder;

    struct Adhoc {
        order: ByteOrder,
        kind: FieldKind,
        width: Option<usize>,
    }

    impl FieldName for Adhoc {
        fn name(&self) -> &str {
            "test.adhoc"
        }

        fn endianness(&self) -> ByteOrder {
            self.order
        }

        fn kind(&self) -> FieldKind {
            self.kind
        }

        fn fixed_width(&self) -> Option<usize> {
            self.width
        }
    }

    fn numeric(order: ByteOrder, width: usize) -> Adhoc {
        Adhoc {
            order,
            kind: FieldKind::Unsigned,
            width: Some(width),
        }
    }

    #[test]
    fn big_endian_two_bytes() {
        let value = decode(&[0x01, 0x02], 0, 2, &numeric(ByteOrder::Big, 2)).unwrap();
        assert_eq!(value, FieldValue::Unsigned(258));
    }

    #[test]
    fn little_endian_two_bytes() {
        let value = decode(&[0x01, 0x02], 0, 2, &numeric(ByteOrder::Little, 2)).unwrap();
        assert_eq!(value, FieldValue::Unsigned(513));
    }

    #[test]
    fn unspecified_keeps_bytes_unchanged() {
        let field = numeric(ByteOrder::Unspecified, 2);
        let value = decode(&[0x41, 0x42], 0, 2, &field).unwrap();
        assert_eq!(value, FieldValue::Bytes(vec![0x41, 0x42]));
    }

    #[test]
    fn unspecified_text_is_ascii() {
        let field = Adhoc {
            order: ByteOrder::Unspecified,
            kind: FieldKind::Text,
            width: None,
        };
        let value = decode(b"AB\0\0", 0, 4, &field).unwrap();
        assert_eq!(value, FieldValue::Text("AB".to_string()));
    }

    #[test]
    fn exact_fit_succeeds_and_one_past_fails() {
        let buffer = [0u8; 6];
        let field = numeric(ByteOrder::Big, 2);
        assert!(decode(&buffer, 4, 2, &field).is_ok());
        let err = decode(&buffer, 5, 2, &field).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { available: 6, .. }));
    }

    #[test]
    fn fixed_width_mismatch_is_invalid_width() {
        let err = decode(&[0u8; 4], 0, 3, &Field::UdpSrcPort).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidWidth {
                field: "udp.src_port".to_string(),
                actual: 3,
                expected: ExpectedWidth::Exactly(2),
            }
        );
    }

    #[test]
    fn out_of_bounds_wins_over_width() {
        let err = decode(&[0u8; 2], 1, 3, &Field::UdpSrcPort).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { .. }));
    }

    #[test]
    fn ordered_numeric_without_fixed_width_limits_to_eight_bytes() {
        let field = Adhoc {
            order: ByteOrder::Little,
            kind: FieldKind::Unsigned,
            width: None,
        };
        assert!(decode(&[0u8; 8], 0, 8, &field).is_ok());
        let err = decode(&[0u8; 9], 0, 9, &field).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidWidth { actual: 9, .. }));
        let err = decode(&[0u8; 1], 0, 0, &field).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidWidth { actual: 0, .. }));
    }

    #[test]
    fn signed_fields_sign_extend() {
        let value = decode(&[0xd8], 0, 1, &Field::RadioRssi).unwrap();
        assert_eq!(value, FieldValue::Signed(-40));

        let field = Adhoc {
            order: ByteOrder::Big,
            kind: FieldKind::Signed,
            width: Some(2),
        };
        let value = decode(&[0xff, 0xfe], 0, 2, &field).unwrap();
        assert_eq!(value, FieldValue::Signed(-2));
    }

    #[test]
    fn round_trip_big_and_little_every_width() {
        for width in 1..=8usize {
            let max = if width == 8 { u64::MAX } else { (1u64 << (width * 8)) - 1 };
            for value in [0, 1, 0x7f, max / 3, max - 1, max] {
                for order in [Endianness::Big, Endianness::Little] {
                    let bytes = encode_uint(value, width, order).unwrap();
                    let field = numeric(order.into(), width);
                    let decoded = decode(&bytes, 0, width, &field).unwrap();
                    assert_eq!(decoded, FieldValue::Unsigned(value), "{order:?} {width}");
                }
            }
        }
    }

    #[test]
    fn round_trip_every_u16_on_registry_fields() {
        for value in 0..=u16::MAX as u64 {
            let be = encode_uint(value, 2, Endianness::Big).unwrap();
            assert_eq!(
                decode(&be, 0, 2, &Field::UdpDestPort).unwrap(),
                FieldValue::Unsigned(value)
            );
            let le = encode_uint(value, 2, Endianness::Little).unwrap();
            assert_eq!(
                decode(&le, 0, 2, &Field::MacDestShort).unwrap(),
                FieldValue::Unsigned(value)
            );
        }
    }

    #[test]
    fn decode_at_uses_field_width() {
        let buffer = [0xaa, 0x34, 0x12, 0x01, 0x02];
        let decoded = decode_at(&buffer, 1, Field::MacDestPan).unwrap();
        assert_eq!(decoded.value, FieldValue::Unsigned(0x1234));
        assert_eq!(decoded.width, 2);

        let payload = decode_at(&buffer, 3, Field::DchPayload).unwrap();
        assert_eq!(payload.value, FieldValue::Bytes(vec![0x01, 0x02]));

        let empty = decode_at(&buffer, 5, Field::DchPayload).unwrap();
        assert_eq!(empty.value, FieldValue::Bytes(Vec::new()));

        assert!(decode_at(&buffer, 6, Field::DchPayload).is_err());
    }
}
