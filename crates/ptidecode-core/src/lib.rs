//! ptidecode core library for offline packet trace (PTI) decoding.
//!
//! The crate is built around a closed vocabulary of protocol fields
//! ([`Field`]) and a byte-order aware decoder ([`decode`]). Every field
//! declares its name and byte order through the [`FieldName`] capability;
//! the decoder turns a span of bytes into a [`FieldValue`] using that
//! metadata. On top of it sit the Debug Channel (DCH) frame parser, a capture
//! file source, name-based filters and a deterministic JSON report.
//!
//! Invariants:
//! - Field metadata is static; a field's byte order never changes.
//! - Decoding is pure and bounds-checked: spans past the buffer are
//!   `OutOfBounds`, width mismatches are `InvalidWidth`.
//! - Report output is deterministic (capture order, no wall-clock time).
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use ptidecode_core::{FieldFilter, decode_capture_file};
//!
//! let filters = vec![FieldFilter::parse("dch.type==3")?];
//! let report = decode_capture_file(Path::new("capture.dch"), &filters)?;
//! println!("frames: {}", report.summary.frames_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod decode;
pub mod field;
pub mod filter;
pub mod protocols;
mod source;

pub use analysis::{AnalysisError, decode_capture_file, decode_source};
pub use decode::{
    DecodeError, DecodedField, ExpectedWidth, FieldValue, decode, decode_at, decode_field,
    encode_uint,
};
pub use field::{ByteOrder, Endianness, Field, FieldKind, FieldName};
pub use filter::{FieldFilter, FilterError};
pub use source::{DchFileSource, FrameSource, RawFrame, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use ptidecode_core::make_stub_report;
///
/// let report = make_stub_report("capture.dch", 123);
/// assert_eq!(report.report_version, ptidecode_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Filter expressions applied to `frames`, in the order given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    pub summary: DecodeSummary,
    /// Decoded frames that matched every filter, in capture order.
    pub frames: Vec<FrameRecord>,
    /// Frames that failed to decode, in capture order.
    pub errors: Vec<FrameErrorRecord>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "ptidecode").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use ptidecode_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.dch".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Capture-wide counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Framed records read from the capture.
    pub frames_total: u64,
    /// Records that decoded successfully.
    pub frames_decoded: u64,
    /// Decoded records that matched every filter.
    pub frames_matched: u64,
    /// Records that failed to decode.
    pub frame_errors: u64,
    /// Bytes discarded while resynchronising on frame boundaries.
    pub skipped_bytes: u64,
    /// Earliest frame timestamp (microseconds), if any frame decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_timestamp_us: Option<u64>,
    /// Latest frame timestamp (microseconds), if any frame decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_timestamp_us: Option<u64>,
    /// Decoded frame counts per debug message type, sorted by raw type.
    pub message_types: Vec<MessageTypeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTypeSummary {
    /// Display name (`printf`, `radio_rx`, `radio_tx` or hex).
    pub message_type: String,
    pub raw_type: u16,
    pub frames: u64,
}

/// A decoded DCH frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    /// Byte offset of the start marker in the capture.
    pub offset: u64,
    pub sequence: u8,
    pub message_type: String,
    pub timestamp_us: u64,
    /// Decoded fields ordered by offset within the frame.
    pub fields: Vec<DecodedField>,
}

/// A framed record that failed to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameErrorRecord {
    pub offset: u64,
    pub message: String,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use ptidecode_core::make_stub_report;
///
/// let report = make_stub_report("capture.dch", 123);
/// assert!(report.frames.is_empty());
/// assert_eq!(report.input.bytes, 123);
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "ptidecode".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        filters: vec![],
        summary: DecodeSummary::default(),
        frames: vec![],
        errors: vec![],
    }
}
