use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ByteOrder, FieldKind, FieldName};

/// Known PTI fields.
///
/// The vocabulary is closed: adding a field means adding a variant and its
/// metadata row.
///
/// # Examples
/// ```
/// use ptidecode_core::{ByteOrder, Field, FieldName};
///
/// let field = Field::from_name("udp.dest_port").unwrap();
/// assert_eq!(field, Field::UdpDestPort);
/// assert_eq!(field.endianness(), ByteOrder::Big);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    DchLength,
    DchVersion,
    DchTimestamp,
    DchType,
    DchSequence,
    DchPayload,
    DebugText,
    RadioRssi,
    RadioChannel,
    RadioStatus,
    RadioProtocol,
    RadioInfo,
    MacFrameControl,
    MacSequence,
    MacDestPan,
    MacDestShort,
    MacSrcShort,
    MacDestLong,
    MacSrcLong,
    UdpSrcPort,
    UdpDestPort,
    UdpLength,
    Ipv6PayloadLength,
    Ipv6FlowLabel,
}

struct FieldMeta {
    name: &'static str,
    order: ByteOrder,
    kind: FieldKind,
    width: Option<usize>,
}

const fn row(
    name: &'static str,
    order: ByteOrder,
    kind: FieldKind,
    width: Option<usize>,
) -> FieldMeta {
    FieldMeta {
        name,
        order,
        kind,
        width,
    }
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 24] = [
        Field::DchLength,
        Field::DchVersion,
        Field::DchTimestamp,
        Field::DchType,
        Field::DchSequence,
        Field::DchPayload,
        Field::DebugText,
        Field::RadioRssi,
        Field::RadioChannel,
        Field::RadioStatus,
        Field::RadioProtocol,
        Field::RadioInfo,
        Field::MacFrameControl,
        Field::MacSequence,
        Field::MacDestPan,
        Field::MacDestShort,
        Field::MacSrcShort,
        Field::MacDestLong,
        Field::MacSrcLong,
        Field::UdpSrcPort,
        Field::UdpDestPort,
        Field::UdpLength,
        Field::Ipv6PayloadLength,
        Field::Ipv6FlowLabel,
    ];

    fn meta(self) -> FieldMeta {
        use ByteOrder::{Big, Little, Unspecified};
        use FieldKind::{Bytes, Signed, Text, Unsigned};

        match self {
            Field::DchLength => row("dch.length", Little, Unsigned, Some(2)),
            Field::DchVersion => row("dch.version", Little, Unsigned, Some(2)),
            Field::DchTimestamp => row("dch.timestamp", Little, Unsigned, Some(6)),
            Field::DchType => row("dch.type", Little, Unsigned, Some(2)),
            Field::DchSequence => row("dch.sequence", Unspecified, Unsigned, Some(1)),
            Field::DchPayload => row("dch.payload", Unspecified, Bytes, None),
            Field::DebugText => row("debug.text", Unspecified, Text, None),
            Field::RadioRssi => row("radio.rssi", Unspecified, Signed, Some(1)),
            Field::RadioChannel => row("radio.channel", Unspecified, Unsigned, Some(1)),
            Field::RadioStatus => row("radio.status", Unspecified, Unsigned, Some(1)),
            Field::RadioProtocol => row("radio.protocol", Unspecified, Unsigned, Some(1)),
            Field::RadioInfo => row("radio.info", Unspecified, Unsigned, Some(1)),
            Field::MacFrameControl => row("mac.frame_control", Little, Unsigned, Some(2)),
            Field::MacSequence => row("mac.sequence", Unspecified, Unsigned, Some(1)),
            Field::MacDestPan => row("mac.dest_pan", Little, Unsigned, Some(2)),
            Field::MacDestShort => row("mac.dest_short", Little, Unsigned, Some(2)),
            Field::MacSrcShort => row("mac.src_short", Little, Unsigned, Some(2)),
            Field::MacDestLong => row("mac.dest_long", Little, Unsigned, Some(8)),
            Field::MacSrcLong => row("mac.src_long", Little, Unsigned, Some(8)),
            Field::UdpSrcPort => row("udp.src_port", Big, Unsigned, Some(2)),
            Field::UdpDestPort => row("udp.dest_port", Big, Unsigned, Some(2)),
            Field::UdpLength => row("udp.length", Big, Unsigned, Some(2)),
            Field::Ipv6PayloadLength => row("ipv6.payload_length", Big, Unsigned, Some(2)),
            // Bytes 1..4 of the IPv6 header; the top nibble belongs to the traffic class.
            Field::Ipv6FlowLabel => row("ipv6.flow_label", Big, Unsigned, Some(3)),
        }
    }

    /// Looks up a field by its exact name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        self.meta().name
    }
}

impl FieldName for Field {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn endianness(&self) -> ByteOrder {
        self.meta().order
    }

    fn kind(&self) -> FieldKind {
        self.meta().kind
    }

    fn fixed_width(&self) -> Option<usize> {
        self.meta().width
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Field::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown field name '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_field_has_a_non_empty_name() {
        for field in Field::ALL {
            assert!(!field.name().is_empty(), "{field:?} has an empty name");
            assert!(matches!(
                field.endianness(),
                ByteOrder::Big | ByteOrder::Little | ByteOrder::Unspecified
            ));
        }
    }

    #[test]
    fn names_are_unique_and_resolve_back() {
        let mut seen = HashSet::new();
        for field in Field::ALL {
            assert!(seen.insert(field.as_str()), "duplicate name {field}");
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
    }

    #[test]
    fn metadata_is_stable_across_queries() {
        for field in Field::ALL {
            assert_eq!(field.endianness(), field.endianness());
            assert_eq!(field.fixed_width(), field.fixed_width());
        }
    }

    #[test]
    fn single_byte_and_sequence_fields_have_no_byte_order() {
        for field in Field::ALL {
            let single_byte = field.fixed_width() == Some(1);
            let sequence = !field.kind().is_numeric();
            if single_byte || sequence {
                assert_eq!(field.endianness(), ByteOrder::Unspecified, "{field}");
            }
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Field::from_name("dch.missing"), None);
        assert_eq!(Field::from_name(""), None);
    }

    #[test]
    fn serializes_as_name() {
        let value = serde_json::to_value(Field::MacDestPan).expect("field json");
        assert_eq!(value, serde_json::json!("mac.dest_pan"));
        let back: Field = serde_json::from_value(value).expect("field from json");
        assert_eq!(back, Field::MacDestPan);
    }
}
