mod dch;

pub use dch::DchFileSource;

use thiserror::Error;

/// One framed record and its byte offset in the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub offset: u64,
    pub data: Vec<u8>,
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>, SourceError>;

    /// Bytes discarded while searching for frame boundaries so far.
    fn skipped_bytes(&self) -> u64 {
        0
    }

    /// Size of the underlying input, when the source knows it.
    fn total_bytes(&self) -> Option<u64> {
        None
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture truncated: {0}")]
    Truncated(String),
}

impl From<dch::error::DchSourceError> for SourceError {
    fn from(value: dch::error::DchSourceError) -> Self {
        match value {
            dch::error::DchSourceError::Io(err) => SourceError::Io(err),
            dch::error::DchSourceError::Empty { context } => {
                SourceError::Truncated(format!("{context}: no data"))
            }
        }
    }
}
