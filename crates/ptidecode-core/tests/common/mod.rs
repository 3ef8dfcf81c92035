#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TYPE_PRINTF: u16 = 0x0003;
pub const TYPE_RADIO_RX: u16 = 0x0029;

pub fn dch_frame(message_type: u16, sequence: u8, timestamp: u64, payload: &[u8]) -> Vec<u8> {
    let declared = (11 + payload.len()) as u16;
    let mut frame = vec![b'['];
    frame.extend_from_slice(&declared.to_le_bytes());
    frame.extend_from_slice(&2u16.to_le_bytes());
    frame.extend_from_slice(&timestamp.to_le_bytes()[..6]);
    frame.extend_from_slice(&message_type.to_le_bytes());
    frame.push(sequence);
    frame.extend_from_slice(payload);
    frame.push(b']');
    frame
}

/// RX payload: PHY length, short-addressed data frame, RSSI -40 on channel 15.
pub fn radio_rx_payload(dest_pan: u16) -> Vec<u8> {
    let mut payload = vec![0x0b, 0x41, 0x88, 0x2a];
    payload.extend_from_slice(&dest_pan.to_le_bytes());
    payload.extend_from_slice(&[0xff, 0xff, 0x01, 0x00]);
    payload.extend_from_slice(&[0xd8, 0x0f, 0x00, 0x00, 0x02]);
    payload
}

/// RX payload carrying an uncompressed 6LoWPAN IPv6/UDP packet to `dest_port`.
pub fn radio_rx_udp_payload(dest_port: u16) -> Vec<u8> {
    let mut payload = vec![0x3f, 0x41, 0x88, 0x2a, 0xcd, 0xab, 0xff, 0xff, 0x01, 0x00];
    payload.push(0x41);
    payload.extend_from_slice(&[0x60, 0x00, 0x00, 0x00, 0x00, 0x0a, 0x11, 0x40]);
    payload.extend_from_slice(&[0u8; 32]);
    payload.extend_from_slice(&5683u16.to_be_bytes());
    payload.extend_from_slice(&dest_port.to_be_bytes());
    payload.extend_from_slice(&[0x00, 0x0a, 0x00, 0x00, 0x68, 0x69]);
    payload.extend_from_slice(&[0xd8, 0x0f, 0x00, 0x00, 0x02]);
    payload
}

pub fn temp_capture(name: &str, data: &[u8]) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("ptidecode_{name}_{unique}.dch"));
    fs::write(&path, data).unwrap();
    path
}
