use std::fs;
use std::path::Path;

use crate::decode::FieldReader;
use crate::protocols::dch::layout;
use crate::source::{FrameSource, RawFrame, SourceError};

use super::error::DchSourceError;

pub struct DchFileSource {
    data: Vec<u8>,
    pos: usize,
    skipped: u64,
}

impl DchFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let data = fs::read(path).map_err(DchSourceError::from)?;
        if data.is_empty() {
            return Err(DchSourceError::Empty {
                context: path.display().to_string(),
            }
            .into());
        }
        Ok(Self::from_bytes(data))
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            skipped: 0,
        }
    }

    fn skip(&mut self, count: usize) {
        self.skipped += count as u64;
        self.pos += count;
    }

    fn next_candidate(&mut self) -> Option<RawFrame> {
        loop {
            let rest = self.data.get(self.pos..)?;
            let remaining = rest.len();
            let Some(found) = rest.iter().position(|&b| b == layout::START_MARKER) else {
                if remaining > 0 {
                    log::debug!("dch: {remaining} trailing bytes without start marker");
                }
                self.skip(remaining);
                return None;
            };
            if found > 0 {
                log::debug!("dch: skipped {found} bytes before offset {}", self.pos + found);
                self.skip(found);
            }

            let start = self.pos;
            let reader = FieldReader::new(&self.data);
            let declared = match reader.read_uint_le(start + layout::LENGTH_OFFSET, 2) {
                Ok(value) => value as usize,
                Err(_) => {
                    log::debug!("dch: truncated length at offset {start}");
                    let remaining = self.data.len() - start;
                    self.skip(remaining);
                    return None;
                }
            };

            let total = layout::frame_len(declared);
            let end_marker = start + total - 1;
            let framed = declared >= layout::HEADER_COUNTED_LEN
                && self.data.get(end_marker) == Some(&layout::END_MARKER);
            if !framed {
                log::debug!("dch: no frame at offset {start} (declared length {declared}), resyncing");
                self.skip(1);
                continue;
            }

            let data = self.data[start..start + total].to_vec();
            self.pos = start + total;
            return Some(RawFrame {
                offset: start as u64,
                data,
            });
        }
    }
}

impl FrameSource for DchFileSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>, SourceError> {
        Ok(self.next_candidate())
    }

    fn skipped_bytes(&self) -> u64 {
        self.skipped
    }

    fn total_bytes(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}
