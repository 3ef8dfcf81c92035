use std::fmt;

use serde::{Serialize, Serializer};

use crate::decode::DecodedField;
use crate::field::{Field, FieldName};

use super::error::DchError;
use super::layout;
use super::reader::DchReader;

/// Debug message type carried in `dch.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugMessageType {
    PrintfAscii,
    RadioRx,
    RadioTx,
    Other(u16),
}

impl DebugMessageType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            layout::TYPE_PRINTF_ASCII => DebugMessageType::PrintfAscii,
            layout::TYPE_RADIO_RX => DebugMessageType::RadioRx,
            layout::TYPE_RADIO_TX => DebugMessageType::RadioTx,
            other => DebugMessageType::Other(other),
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            DebugMessageType::PrintfAscii => layout::TYPE_PRINTF_ASCII,
            DebugMessageType::RadioRx => layout::TYPE_RADIO_RX,
            DebugMessageType::RadioTx => layout::TYPE_RADIO_TX,
            DebugMessageType::Other(value) => value,
        }
    }

    fn appended_info_len(self) -> Option<usize> {
        match self {
            DebugMessageType::RadioRx => Some(layout::RX_APPENDED_INFO_LEN),
            DebugMessageType::RadioTx => Some(layout::TX_APPENDED_INFO_LEN),
            _ => None,
        }
    }
}

impl fmt::Display for DebugMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugMessageType::PrintfAscii => f.write_str("printf"),
            DebugMessageType::RadioRx => f.write_str("radio_rx"),
            DebugMessageType::RadioTx => f.write_str("radio_tx"),
            DebugMessageType::Other(value) => write!(f, "{value:#06x}"),
        }
    }
}

impl Serialize for DebugMessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
pub struct DchFrame {
    pub version: u16,
    pub timestamp_us: u64,
    pub message_type: DebugMessageType,
    pub sequence: u8,
    pub payload: Vec<u8>,
    /// Every decoded field, ordered by offset within the frame.
    pub fields: Vec<DecodedField>,
}

impl DchFrame {
    /// First decoded occurrence of `field`.
    pub fn field(&self, field: Field) -> Option<&DecodedField> {
        self.fields.iter().find(|decoded| decoded.name == field)
    }
}

/// Parses one complete DCH frame (start marker through end marker).
///
/// Returns `Ok(None)` when the buffer does not start with a DCH start marker.
pub fn parse_dch_frame(frame: &[u8]) -> Result<Option<DchFrame>, DchError> {
    if frame.first() != Some(&layout::START_MARKER) {
        return Ok(None);
    }

    let mut reader = DchReader::new(frame);
    reader.require_len(layout::MIN_FRAME_LEN)?;

    let declared = reader.uint(layout::LENGTH_OFFSET, Field::DchLength)?;
    let declared_len = declared as usize;
    let expected_len = layout::frame_len(declared_len);
    if declared_len < layout::HEADER_COUNTED_LEN || expected_len != reader.len() {
        return Err(DchError::LengthMismatch {
            declared,
            actual: reader.len(),
        });
    }

    let end = reader.len() - 1;
    let found = reader.read_u8(end)?;
    if found != layout::END_MARKER {
        return Err(DchError::MissingEndMarker { found });
    }

    let version = reader.uint(layout::VERSION_OFFSET, Field::DchVersion)?;
    if version != layout::SUPPORTED_VERSION {
        return Err(DchError::UnsupportedVersion { version });
    }

    let timestamp_us = reader.uint(layout::TIMESTAMP_OFFSET, Field::DchTimestamp)?;
    let raw_type = reader.uint(layout::TYPE_OFFSET, Field::DchType)?;
    let message_type = DebugMessageType::from_u16(raw_type as u16);
    let sequence = reader.uint(layout::SEQUENCE_OFFSET, Field::DchSequence)? as u8;

    let payload_range = layout::PAYLOAD_OFFSET..end;
    let payload = reader.slice(payload_range.clone())?.to_vec();
    reader.span(payload_range.start, payload_range.len(), Field::DchPayload)?;

    match message_type {
        DebugMessageType::PrintfAscii => {
            reader.span(payload_range.start, payload_range.len(), Field::DebugText)?;
        }
        DebugMessageType::RadioRx | DebugMessageType::RadioTx => {
            parse_radio_payload(&mut reader, message_type, payload_range)?;
        }
        DebugMessageType::Other(_) => {}
    }

    Ok(Some(DchFrame {
        version: version as u16,
        timestamp_us,
        message_type,
        sequence,
        payload,
        fields: reader.into_fields(),
    }))
}

fn parse_radio_payload(
    reader: &mut DchReader<'_>,
    message_type: DebugMessageType,
    payload: std::ops::Range<usize>,
) -> Result<(), DchError> {
    let appended_len = message_type.appended_info_len().unwrap_or(0);
    if payload.len() < appended_len {
        return Err(DchError::TooShort {
            needed: layout::frame_len(layout::HEADER_COUNTED_LEN + appended_len),
            actual: reader.len(),
        });
    }

    let info_start = payload.end - appended_len;
    let appended: &[Field] = match message_type {
        DebugMessageType::RadioRx => &[
            Field::RadioRssi,
            Field::RadioChannel,
            Field::RadioInfo,
            Field::RadioStatus,
            Field::RadioProtocol,
        ],
        _ => &[Field::RadioInfo, Field::RadioStatus, Field::RadioProtocol],
    };
    for (index, field) in appended.iter().enumerate() {
        reader.field(info_start + index, *field)?;
    }

    let mac_start = payload.start + layout::PHY_HEADER_LEN;
    if mac_start >= info_start {
        return Ok(());
    }
    if let Some(header) = parse_mac_header(reader, mac_start..info_start)? {
        if header.carries_plain_data() {
            parse_lowpan_payload(reader, header.end..info_start)?;
        }
    }
    Ok(())
}

/// A fully decoded 802.15.4 MAC header.
struct MacHeader {
    frame_control: u64,
    /// Frame offset of the first MAC payload byte.
    end: usize,
}

impl MacHeader {
    fn carries_plain_data(&self) -> bool {
        self.frame_control & layout::MAC_FRAME_TYPE_MASK == layout::MAC_FRAME_TYPE_DATA
            && self.frame_control & layout::MAC_SECURITY_ENABLED == 0
    }
}

/// Decodes the 802.15.4 MAC header fields present in `mac`.
///
/// Decoding stops at the first field that does not fit; the header is only
/// returned when every addressing field was decoded.
fn parse_mac_header(
    reader: &mut DchReader<'_>,
    mac: std::ops::Range<usize>,
) -> Result<Option<MacHeader>, DchError> {
    let fits = |offset: usize, width: usize| offset + width <= mac.end;

    let mut offset = mac.start;
    if !fits(offset, 2) {
        return Ok(None);
    }
    let frame_control = reader.uint(offset, Field::MacFrameControl)?;
    offset += 2;

    if !fits(offset, 1) {
        return Ok(None);
    }
    reader.field(offset, Field::MacSequence)?;
    offset += 1;

    let dest_mode = (frame_control >> layout::MAC_DEST_MODE_SHIFT) & layout::MAC_ADDR_MODE_MASK;
    let src_mode = (frame_control >> layout::MAC_SRC_MODE_SHIFT) & layout::MAC_ADDR_MODE_MASK;
    let pan_compressed = frame_control & layout::MAC_PAN_COMPRESSION != 0;

    if dest_mode != 0 {
        if !fits(offset, layout::MAC_PAN_ID_LEN) {
            return Ok(None);
        }
        reader.field(offset, Field::MacDestPan)?;
        offset += layout::MAC_PAN_ID_LEN;

        let Some(field) = address_field(dest_mode, Field::MacDestShort, Field::MacDestLong) else {
            return Ok(None);
        };
        if !advance(reader, &mut offset, field, mac.end)? {
            return Ok(None);
        }
    }

    if src_mode != 0 {
        if !pan_compressed {
            // Source PAN id is not part of the vocabulary; skip it.
            if !fits(offset, layout::MAC_PAN_ID_LEN) {
                return Ok(None);
            }
            offset += layout::MAC_PAN_ID_LEN;
        }
        let Some(field) = address_field(src_mode, Field::MacSrcShort, Field::MacSrcLong) else {
            return Ok(None);
        };
        if !advance(reader, &mut offset, field, mac.end)? {
            return Ok(None);
        }
    }

    Ok(Some(MacHeader {
        frame_control,
        end: offset,
    }))
}

/// Decodes an uncompressed 6LoWPAN IPv6 header and, for UDP, the UDP header.
///
/// Anything else in the MAC payload is left undecoded.
fn parse_lowpan_payload(
    reader: &mut DchReader<'_>,
    payload: std::ops::Range<usize>,
) -> Result<(), DchError> {
    if payload.len() < 1 + layout::IPV6_HEADER_LEN
        || reader.read_u8(payload.start)? != layout::LOWPAN_DISPATCH_IPV6
    {
        return Ok(());
    }

    let ipv6 = payload.start + 1;
    if reader.read_u8(ipv6)? >> 4 != layout::IPV6_VERSION {
        return Ok(());
    }
    reader.field(ipv6 + layout::IPV6_FLOW_LABEL_OFFSET, Field::Ipv6FlowLabel)?;
    reader.field(ipv6 + layout::IPV6_PAYLOAD_LENGTH_OFFSET, Field::Ipv6PayloadLength)?;

    let next_header = reader.read_u8(ipv6 + layout::IPV6_NEXT_HEADER_OFFSET)?;
    let udp = ipv6 + layout::IPV6_HEADER_LEN;
    if next_header != layout::IPV6_NEXT_HEADER_UDP || udp + layout::UDP_HEADER_LEN > payload.end {
        return Ok(());
    }
    reader.field(udp + layout::UDP_SRC_PORT_OFFSET, Field::UdpSrcPort)?;
    reader.field(udp + layout::UDP_DEST_PORT_OFFSET, Field::UdpDestPort)?;
    reader.field(udp + layout::UDP_LENGTH_OFFSET, Field::UdpLength)?;
    Ok(())
}

fn address_field(mode: u64, short: Field, long: Field) -> Option<Field> {
    match mode {
        layout::MAC_ADDR_MODE_SHORT => Some(short),
        layout::MAC_ADDR_MODE_LONG => Some(long),
        _ => None,
    }
}

fn advance(
    reader: &mut DchReader<'_>,
    offset: &mut usize,
    field: Field,
    end: usize,
) -> Result<bool, DchError> {
    let width = field.fixed_width().unwrap_or(0);
    if *offset + width > end {
        return Ok(false);
    }
    reader.field(*offset, field)?;
    *offset += width;
    Ok(true)
}
