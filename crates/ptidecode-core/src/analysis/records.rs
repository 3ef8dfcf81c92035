use std::collections::HashMap;

use crate::protocols::dch::{DchFrame, DebugMessageType};
use crate::{FrameRecord, MessageTypeSummary};

pub(crate) fn frame_record(offset: u64, frame: DchFrame) -> FrameRecord {
    FrameRecord {
        offset,
        sequence: frame.sequence,
        message_type: frame.message_type.to_string(),
        timestamp_us: frame.timestamp_us,
        fields: frame.fields,
    }
}

pub(crate) fn add_message_type(stats: &mut HashMap<DebugMessageType, u64>, frame: &DchFrame) {
    *stats.entry(frame.message_type).or_default() += 1;
}

pub(crate) fn build_message_type_summaries(
    stats: HashMap<DebugMessageType, u64>,
) -> Vec<MessageTypeSummary> {
    let mut summaries: Vec<_> = stats
        .into_iter()
        .map(|(message_type, frames)| (message_type.as_u16(), message_type, frames))
        .collect();
    summaries.sort_by_key(|(raw, _, _)| *raw);
    summaries
        .into_iter()
        .map(|(raw, message_type, frames)| MessageTypeSummary {
            message_type: message_type.to_string(),
            raw_type: raw,
            frames,
        })
        .collect()
}

pub(crate) fn update_ts_bounds(first: &mut Option<u64>, last: &mut Option<u64>, ts: u64) {
    match first {
        Some(existing) if *existing <= ts => {}
        _ => *first = Some(ts),
    }
    match last {
        Some(existing) if *existing >= ts => {}
        _ => *last = Some(ts),
    }
}
