use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::filter::{FieldFilter, matches_all};
use crate::protocols::dch::parse_dch_frame;
use crate::source::{DchFileSource, FrameSource, RawFrame, SourceError};
use crate::{DecodeSummary, FrameErrorRecord, Report, make_stub_report};

mod records;

use records::{add_message_type, build_message_type_summaries, frame_record, update_ts_bounds};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decodes every DCH frame in a capture file.
pub fn decode_capture_file(path: &Path, filters: &[FieldFilter]) -> Result<Report, AnalysisError> {
    let source = DchFileSource::open(path)?;
    decode_source(path, source, filters)
}

/// Decodes frames from any source; `path` is only used for report metadata.
///
/// The reported input size comes from the source. Sources that do not know
/// it fall back to the size of `path` on disk, or 0 when there is no file.
///
/// Frames that fail to parse are reported in `errors` and do not stop the
/// run. Only frames matching every filter are listed in `frames`.
pub fn decode_source<S: FrameSource>(
    path: &Path,
    mut source: S,
    filters: &[FieldFilter],
) -> Result<Report, AnalysisError> {
    let mut summary = DecodeSummary::default();
    let mut message_types = HashMap::new();
    let mut frames = Vec::new();
    let mut errors = Vec::new();

    while let Some(RawFrame { offset, data }) = source.next_frame()? {
        summary.frames_total += 1;
        let frame = match parse_dch_frame(&data) {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::debug!("frame at offset {offset} has no DCH start marker");
                summary.frame_errors += 1;
                errors.push(FrameErrorRecord {
                    offset,
                    message: "not a DCH frame".to_string(),
                });
                continue;
            }
            Err(err) => {
                log::debug!("frame at offset {offset} failed to decode: {err}");
                summary.frame_errors += 1;
                errors.push(FrameErrorRecord {
                    offset,
                    message: err.to_string(),
                });
                continue;
            }
        };

        summary.frames_decoded += 1;
        update_ts_bounds(
            &mut summary.first_timestamp_us,
            &mut summary.last_timestamp_us,
            frame.timestamp_us,
        );
        add_message_type(&mut message_types, &frame);

        if matches_all(filters, &frame) {
            summary.frames_matched += 1;
            frames.push(frame_record(offset, frame));
        }
    }
    summary.skipped_bytes = source.skipped_bytes();
    summary.message_types = build_message_type_summaries(message_types);
    log::debug!(
        "decoded {} of {} frames ({} matched, {} skipped bytes)",
        summary.frames_decoded,
        summary.frames_total,
        summary.frames_matched,
        summary.skipped_bytes
    );

    let input_bytes = source
        .total_bytes()
        .or_else(|| path.metadata().ok().map(|meta| meta.len()))
        .unwrap_or(0);
    let mut report = make_stub_report(&path.display().to_string(), input_bytes);
    report.filters = filters.iter().map(ToString::to_string).collect();
    report.summary = summary;
    report.frames = frames;
    report.errors = errors;
    Ok(report)
}
