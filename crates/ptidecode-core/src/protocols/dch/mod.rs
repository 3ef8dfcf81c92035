//! Silicon Labs Debug Channel (DCH) frame decoding.
//!
//! A DCH frame is `[`, a little endian length, the header (version,
//! timestamp, debug message type, sequence), the payload and `]`. The parser
//! checks framing and version, then records every header field through the
//! registry. Printf payloads are decoded as text; radio RX/TX payloads expose
//! the trailing appended radio info and the 802.15.4 MAC header.
//!
//! Offsets live in `layout`, bounds-checked access in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{DchFrame, DebugMessageType, parse_dch_frame};
