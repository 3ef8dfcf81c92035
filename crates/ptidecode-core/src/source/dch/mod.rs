//! DCH capture file source.
//!
//! A capture is a plain concatenation of DCH frames. The source scans for the
//! start marker, uses the declared length to find the end marker and emits
//! each complete frame. Bytes that do not form a frame are skipped and
//! counted so the decoder can resynchronise after corruption.

pub mod error;
pub mod parser;

pub use parser::DchFileSource;
