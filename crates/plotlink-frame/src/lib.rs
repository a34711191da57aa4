//! Marker-delimited packet framing for the plotlink serial protocol.
//!
//! Every block of a drawing program travels as one packet:
//! - A start marker byte (0xAA)
//! - A one-byte block type naming the axis and role of the payload
//! - The payload bytes, byte-stuffed so markers never appear inside
//! - An end marker byte (0x55)
//!
//! There is no length field and no checksum. Receivers recover lengths from
//! the end marker or from a shared [`LengthContract`].

pub mod block;
pub mod codec;
pub mod contract;
pub mod error;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub mod tokio_codec;

pub use block::{Axis, BlockType, Role};
pub use codec::{
    check_payload, decode_packet, encode_packet, FrameConfig, MarkerPolicy, Packet,
    DEFAULT_MAX_PAYLOAD, END_MARKER, ESCAPE, ESCAPE_XOR, PACKET_OVERHEAD, START_MARKER,
};
pub use contract::LengthContract;
pub use error::{FrameError, Result};
pub use reader::PacketReader;
pub use writer::PacketWriter;

#[cfg(feature = "async")]
pub use tokio_codec::PacketCodec;
