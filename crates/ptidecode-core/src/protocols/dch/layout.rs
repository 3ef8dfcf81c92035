pub const START_MARKER: u8 = b'[';
pub const END_MARKER: u8 = b']';

pub const LENGTH_OFFSET: usize = 1;
pub const VERSION_OFFSET: usize = 3;
pub const TIMESTAMP_OFFSET: usize = 5;
pub const TYPE_OFFSET: usize = 11;
pub const SEQUENCE_OFFSET: usize = 13;
pub const PAYLOAD_OFFSET: usize = 14;

/// Bytes counted by `dch.length` before the payload (version..=sequence).
pub const HEADER_COUNTED_LEN: usize = PAYLOAD_OFFSET - VERSION_OFFSET;
/// Frame bytes not counted by `dch.length` (start marker, length, end marker).
pub const FRAMING_OVERHEAD: usize = VERSION_OFFSET + 1;
pub const MIN_FRAME_LEN: usize = PAYLOAD_OFFSET + 1;

pub const SUPPORTED_VERSION: u64 = 2;

pub const TYPE_PRINTF_ASCII: u16 = 0x0003;
pub const TYPE_RADIO_RX: u16 = 0x0029;
pub const TYPE_RADIO_TX: u16 = 0x002a;

pub const RX_APPENDED_INFO_LEN: usize = 5;
pub const TX_APPENDED_INFO_LEN: usize = 3;
pub const PHY_HEADER_LEN: usize = 1;

pub const MAC_DEST_MODE_SHIFT: u64 = 10;
pub const MAC_SRC_MODE_SHIFT: u64 = 14;
pub const MAC_ADDR_MODE_MASK: u64 = 0b11;
pub const MAC_PAN_COMPRESSION: u64 = 1 << 6;
pub const MAC_ADDR_MODE_SHORT: u64 = 0b10;
pub const MAC_ADDR_MODE_LONG: u64 = 0b11;
pub const MAC_PAN_ID_LEN: usize = 2;
pub const MAC_FRAME_TYPE_MASK: u64 = 0b111;
pub const MAC_FRAME_TYPE_DATA: u64 = 0b001;
pub const MAC_SECURITY_ENABLED: u64 = 1 << 3;

/// 6LoWPAN dispatch for an uncompressed IPv6 header.
pub const LOWPAN_DISPATCH_IPV6: u8 = 0x41;

pub const IPV6_HEADER_LEN: usize = 40;
pub const IPV6_VERSION: u8 = 6;
/// Three bytes after the version byte: low traffic-class nibble and flow label.
pub const IPV6_FLOW_LABEL_OFFSET: usize = 1;
pub const IPV6_PAYLOAD_LENGTH_OFFSET: usize = 4;
pub const IPV6_NEXT_HEADER_OFFSET: usize = 6;
pub const IPV6_NEXT_HEADER_UDP: u8 = 17;

pub const UDP_HEADER_LEN: usize = 8;
pub const UDP_SRC_PORT_OFFSET: usize = 0;
pub const UDP_DEST_PORT_OFFSET: usize = 2;
pub const UDP_LENGTH_OFFSET: usize = 4;

/// Total frame length for a declared `dch.length`.
pub fn frame_len(declared: usize) -> usize {
    declared + FRAMING_OVERHEAD
}
