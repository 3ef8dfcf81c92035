use crate::decode::{DecodedField, FieldValue, decode_field};
use crate::field::{Field, FieldName};

use super::error::DchError;

/// Frame reader that records every decoded field in order.
pub struct DchReader<'a> {
    frame: &'a [u8],
    fields: Vec<DecodedField>,
}

impl<'a> DchReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self {
            frame,
            fields: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DchError> {
        if self.frame.len() < needed {
            return Err(DchError::TooShort {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DchError> {
        self.frame.get(offset).copied().ok_or(DchError::TooShort {
            needed: offset + 1,
            actual: self.frame.len(),
        })
    }

    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DchError> {
        self.frame.get(range.clone()).ok_or(DchError::TooShort {
            needed: range.end,
            actual: self.frame.len(),
        })
    }

    /// Decodes a fixed-width field at `offset`.
    pub fn field(&mut self, offset: usize, field: Field) -> Result<&FieldValue, DchError> {
        let width = field.fixed_width().unwrap_or(0);
        self.span(offset, width, field)
    }

    /// Decodes `length` bytes at `offset` as `field`.
    pub fn span(
        &mut self,
        offset: usize,
        length: usize,
        field: Field,
    ) -> Result<&FieldValue, DchError> {
        let decoded = decode_field(self.frame, offset, length, field)?;
        self.fields.push(decoded);
        Ok(&self.fields[self.fields.len() - 1].value)
    }

    /// Decodes a numeric field and returns it as an integer.
    pub fn uint(&mut self, offset: usize, field: Field) -> Result<u64, DchError> {
        match self.field(offset, field)? {
            FieldValue::Unsigned(value) => Ok(*value),
            _ => Err(DchError::UnexpectedValue {
                field: field.as_str(),
            }),
        }
    }

    /// Returns the recorded fields ordered by offset.
    pub fn into_fields(mut self) -> Vec<DecodedField> {
        self.fields.sort_by_key(|field| field.offset);
        self.fields
    }
}
