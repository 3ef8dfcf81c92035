mod common;

use std::fs;

use ptidecode_core::{DchFileSource, FrameSource, SourceError};

use common::{TYPE_PRINTF, dch_frame, temp_capture};

#[test]
fn dch_source_reads_frames_from_file() {
    let mut data = dch_frame(TYPE_PRINTF, 1, 10, b"boot\0");
    data.extend(dch_frame(TYPE_PRINTF, 2, 20, b"ready\0"));
    let path = temp_capture("source", &data);

    let mut source = DchFileSource::open(&path).unwrap();
    let mut offsets = Vec::new();
    while let Some(frame) = source.next_frame().unwrap() {
        offsets.push(frame.offset);
    }
    let _ = fs::remove_file(&path);

    assert_eq!(offsets, vec![0, 20]);
    assert_eq!(source.skipped_bytes(), 0);
}

#[test]
fn dch_source_rejects_empty_file() {
    let path = temp_capture("empty", &[]);
    let err = match DchFileSource::open(&path) {
        Ok(_) => panic!("expected empty file to be rejected"),
        Err(err) => err,
    };
    let _ = fs::remove_file(&path);

    assert!(matches!(err, SourceError::Truncated(_)));
}

#[test]
fn dch_source_reports_missing_file() {
    let mut path = std::env::temp_dir();
    path.push("ptidecode_missing_capture_does_not_exist.dch");
    let err = match DchFileSource::open(&path) {
        Ok(_) => panic!("expected missing file to fail"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}
