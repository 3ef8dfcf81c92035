mod common;

use std::fs;
use std::path::Path;

use ptidecode_core::{
    DchFileSource, Field, FieldFilter, FieldValue, REPORT_VERSION, decode_capture_file,
    decode_source,
};

use common::{
    TYPE_PRINTF, TYPE_RADIO_RX, dch_frame, radio_rx_payload, radio_rx_udp_payload, temp_capture,
};

fn sample_capture() -> Vec<u8> {
    let mut data = vec![0x00, 0x01];
    data.extend(dch_frame(TYPE_PRINTF, 1, 100, b"boot\0"));
    data.extend(dch_frame(TYPE_RADIO_RX, 2, 200, &radio_rx_payload(0xabcd)));
    data.extend(dch_frame(TYPE_RADIO_RX, 3, 300, &radio_rx_payload(0x1234)));
    // RX frame without room for the appended radio info.
    data.extend(dch_frame(TYPE_RADIO_RX, 4, 400, &[0x01]));
    data
}

#[test]
fn decodes_every_frame_in_capture_order() {
    let path = temp_capture("pipeline", &sample_capture());
    let report = decode_capture_file(&path, &[]).expect("decode capture");
    let _ = fs::remove_file(&path);

    assert_eq!(report.report_version, REPORT_VERSION);
    assert_eq!(report.summary.frames_total, 4);
    assert_eq!(report.summary.frames_decoded, 3);
    assert_eq!(report.summary.frames_matched, 3);
    assert_eq!(report.summary.frame_errors, 1);
    assert_eq!(report.summary.skipped_bytes, 2);
    assert_eq!(report.summary.first_timestamp_us, Some(100));
    assert_eq!(report.summary.last_timestamp_us, Some(300));

    let sequences: Vec<_> = report.frames.iter().map(|f| f.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    assert_eq!(report.frames[0].message_type, "printf");
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("frame too short"));

    let types: Vec<_> = report
        .summary
        .message_types
        .iter()
        .map(|t| (t.message_type.as_str(), t.frames))
        .collect();
    assert_eq!(types, vec![("printf", 1), ("radio_rx", 2)]);
}

#[test]
fn filters_select_matching_frames() {
    let path = temp_capture("filtered", &sample_capture());
    let filters = vec![FieldFilter::parse("mac.dest_pan==0xabcd").unwrap()];
    let report = decode_capture_file(&path, &filters).expect("decode capture");
    let _ = fs::remove_file(&path);

    assert_eq!(report.summary.frames_decoded, 3);
    assert_eq!(report.summary.frames_matched, 1);
    assert_eq!(report.frames[0].sequence, 2);
    assert_eq!(report.filters, vec!["mac.dest_pan==0xabcd".to_string()]);
}

#[test]
fn report_json_uses_field_names() {
    let path = temp_capture("json", &sample_capture());
    let report = decode_capture_file(&path, &[]).expect("decode capture");
    let _ = fs::remove_file(&path);

    let value = serde_json::to_value(&report).expect("report json");
    let fields = value["frames"][1]["fields"].as_array().expect("fields");
    let rssi = fields
        .iter()
        .find(|f| f["name"] == "radio.rssi")
        .expect("rssi field");
    assert_eq!(rssi["value"], -40);

    let again = serde_json::to_value(decode_bytes(&sample_capture())).unwrap();
    assert_eq!(value["frames"], again["frames"]);
}

#[test]
fn in_memory_source_needs_no_file() {
    let data = sample_capture();
    let len = data.len() as u64;
    let path = Path::new("in-memory.dch");
    let report =
        decode_source(path, DchFileSource::from_bytes(data), &[]).expect("decode in memory");

    assert_eq!(report.input.path, "in-memory.dch");
    assert_eq!(report.input.bytes, len);
    assert_eq!(report.summary.frames_decoded, 3);

    let report = decode_source(path, DchFileSource::from_bytes(vec![0u8; 3]), &[])
        .expect("decode garbage in memory");
    assert_eq!(report.summary.frames_total, 0);
    assert_eq!(report.summary.skipped_bytes, 3);
}

#[test]
fn udp_filter_selects_big_endian_port() {
    let mut data = dch_frame(TYPE_RADIO_RX, 1, 10, &radio_rx_udp_payload(0x04d2));
    data.extend(dch_frame(TYPE_RADIO_RX, 2, 20, &radio_rx_udp_payload(0x0035)));
    data.extend(dch_frame(TYPE_RADIO_RX, 3, 30, &radio_rx_payload(0xabcd)));
    let filters = vec![FieldFilter::parse("udp.dest_port==0x4d2").unwrap()];
    let report = decode_source(Path::new("udp.dch"), DchFileSource::from_bytes(data), &filters)
        .expect("decode udp capture");

    assert_eq!(report.summary.frames_decoded, 3);
    assert_eq!(report.summary.frames_matched, 1);
    let frame = &report.frames[0];
    assert_eq!(frame.sequence, 1);
    let port = frame
        .fields
        .iter()
        .find(|f| f.name == Field::UdpDestPort)
        .expect("udp.dest_port");
    assert_eq!(port.value, FieldValue::Unsigned(1234));
    assert_eq!(port.width, 2);

    let present = vec![FieldFilter::parse("udp.src_port").unwrap()];
    let data = dch_frame(TYPE_RADIO_RX, 4, 40, &radio_rx_payload(0xabcd));
    let report = decode_source(Path::new("udp.dch"), DchFileSource::from_bytes(data), &present)
        .expect("decode plain mac capture");
    assert_eq!(report.summary.frames_matched, 0);
}

fn decode_bytes(data: &[u8]) -> ptidecode_core::Report {
    let path = temp_capture("json_again", data);
    let report = decode_capture_file(&path, &[]).expect("decode capture");
    let _ = fs::remove_file(&path);
    report
}
