use super::error::{DecodeError, ExpectedWidth};
use super::layout;

/// Bounds-checked byte access shared by the decoder and protocol parsers.
pub struct FieldReader<'a> {
    buffer: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.buffer.len() < needed {
            return Err(DecodeError::OutOfBounds {
                offset: 0,
                length: needed,
                available: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, offset: usize, length: usize) -> Result<&'a [u8], DecodeError> {
        let out_of_bounds = DecodeError::OutOfBounds {
            offset,
            length,
            available: self.buffer.len(),
        };
        let end = offset.checked_add(length).ok_or(out_of_bounds.clone())?;
        self.buffer.get(offset..end).ok_or(out_of_bounds)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.read_slice(offset, 1).map(|bytes| bytes[0])
    }

    pub fn read_uint_be(&self, offset: usize, length: usize) -> Result<u64, DecodeError> {
        let bytes = self.read_int_bytes(offset, length)?;
        Ok(bytes
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
    }

    pub fn read_uint_le(&self, offset: usize, length: usize) -> Result<u64, DecodeError> {
        let bytes = self.read_int_bytes(offset, length)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
    }

    fn read_int_bytes(&self, offset: usize, length: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.read_slice(offset, length)?;
        if !(1..=layout::MAX_INT_WIDTH).contains(&length) {
            return Err(DecodeError::InvalidWidth {
                field: "integer".to_string(),
                actual: length,
                expected: ExpectedWidth::Between(1, layout::MAX_INT_WIDTH),
            });
        }
        Ok(bytes)
    }
}
