use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::block::BlockType;
use crate::contract::LengthContract;
use crate::error::{FrameError, Result};

/// First byte of every packet.
pub const START_MARKER: u8 = 0xAA;

/// Last byte of every packet.
pub const END_MARKER: u8 = 0x55;

/// Introduces a stuffed payload byte under [`MarkerPolicy::Escaped`].
pub const ESCAPE: u8 = 0x7D;

/// Mask applied to a stuffed byte.
pub const ESCAPE_XOR: u8 = 0x20;

/// Start marker + type byte + end marker.
pub const PACKET_OVERHEAD: usize = 3;

/// Default maximum payload size (decoded bytes).
pub const DEFAULT_MAX_PAYLOAD: usize = 64;

/// A typed block of a drawing program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Which axis and role the payload belongs to.
    pub block: BlockType,
    /// Decoded payload bytes.
    pub payload: Bytes,
}

impl Packet {
    /// Create a new packet.
    pub fn new(block: BlockType, payload: impl Into<Bytes>) -> Self {
        Self {
            block,
            payload: payload.into(),
        }
    }

    /// The number of bytes this packet occupies on the wire.
    pub fn wire_size(&self, policy: MarkerPolicy) -> usize {
        let stuffed = match policy {
            MarkerPolicy::Escaped => self.payload.iter().filter(|&&b| needs_escape(b)).count(),
            MarkerPolicy::Raw => 0,
        };
        PACKET_OVERHEAD + self.payload.len() + stuffed
    }
}

/// How payload bytes equal to a marker are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    /// Byte-stuff markers and the escape byte as `ESCAPE, byte ^ ESCAPE_XOR`.
    #[default]
    Escaped,
    /// Legacy wire format: payload bytes go out verbatim and a payload that
    /// contains a marker is rejected.
    Raw,
}

impl MarkerPolicy {
    pub fn name(self) -> &'static str {
        match self {
            MarkerPolicy::Escaped => "escaped",
            MarkerPolicy::Raw => "raw",
        }
    }
}

/// Configuration for the packet codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum decoded payload size in bytes. Default: 64.
    pub max_payload_size: usize,
    /// Marker collision handling. Default: escaped.
    pub marker_policy: MarkerPolicy,
    /// Per-block payload lengths to enforce. Default: none.
    pub contract: Option<LengthContract>,
    /// Yield the thread after each packet written. Default: true.
    pub yield_after_packet: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            marker_policy: MarkerPolicy::Escaped,
            contract: None,
            yield_after_packet: true,
        }
    }
}

fn needs_escape(byte: u8) -> bool {
    byte == START_MARKER || byte == END_MARKER || byte == ESCAPE
}

/// Validate a payload against the configuration without encoding it.
pub fn check_payload(block: BlockType, payload: &[u8], config: &FrameConfig) -> Result<()> {
    if payload.len() > config.max_payload_size {
        return Err(FrameError::PayloadExceedsLimit {
            size: payload.len(),
            max: config.max_payload_size,
        });
    }

    if let Some(contract) = &config.contract {
        contract.check(block, payload.len())?;
    }

    if config.marker_policy == MarkerPolicy::Raw {
        if let Some(offset) = payload
            .iter()
            .position(|&b| b == START_MARKER || b == END_MARKER)
        {
            return Err(FrameError::FramingAmbiguity {
                block,
                offset,
                byte: payload[offset],
            });
        }
    }

    Ok(())
}

/// Encode a packet into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────────────────┬──────────┐
/// │ Start    │ Type     │ Payload              │ End      │
/// │ 0xAA     │ (1B)     │ (stuffed, no length) │ 0x55     │
/// └──────────┴──────────┴──────────────────────┴──────────┘
/// ```
///
/// Nothing is appended to `dst` when validation fails.
pub fn encode_packet(
    block: BlockType,
    payload: &[u8],
    config: &FrameConfig,
    dst: &mut BytesMut,
) -> Result<()> {
    check_payload(block, payload, config)?;

    dst.reserve(PACKET_OVERHEAD + payload.len());
    dst.put_u8(START_MARKER);
    dst.put_u8(block.as_u8());
    match config.marker_policy {
        MarkerPolicy::Escaped => {
            for &byte in payload {
                if needs_escape(byte) {
                    dst.put_u8(ESCAPE);
                    dst.put_u8(byte ^ ESCAPE_XOR);
                } else {
                    dst.put_u8(byte);
                }
            }
        }
        MarkerPolicy::Raw => dst.put_slice(payload),
    }
    dst.put_u8(END_MARKER);
    Ok(())
}

/// Decode a packet from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete packet yet.
/// Bytes before a start marker are discarded. On success or on a packet
/// level error, the offending bytes are consumed so the next call resumes
/// at the following start marker.
pub fn decode_packet(src: &mut BytesMut, config: &FrameConfig) -> Result<Option<Packet>> {
    match src.iter().position(|&b| b == START_MARKER) {
        Some(0) => {}
        Some(skip) => {
            debug!(dropped = skip, "discarding bytes before start marker");
            src.advance(skip);
        }
        None => {
            if !src.is_empty() {
                debug!(dropped = src.len(), "discarding bytes outside a packet");
                src.clear();
            }
            return Ok(None);
        }
    }

    if src.len() < 2 {
        return Ok(None); // Need more data
    }

    let type_byte = src[1];
    if type_byte == START_MARKER {
        src.advance(1);
        return Err(FrameError::UnterminatedPacket);
    }
    if type_byte == END_MARKER {
        src.advance(2);
        return Err(FrameError::UnknownBlockType(type_byte));
    }

    let escaping = config.marker_policy == MarkerPolicy::Escaped;
    let mut payload = BytesMut::new();
    let mut pending_escape = false;

    for idx in 2..src.len() {
        let byte = src[idx];
        match byte {
            START_MARKER => {
                src.advance(idx);
                return Err(FrameError::UnterminatedPacket);
            }
            END_MARKER => {
                src.advance(idx + 1);
                if pending_escape {
                    return Err(FrameError::InvalidEscape);
                }
                let block = BlockType::try_from(type_byte)?;
                if let Some(contract) = &config.contract {
                    contract.check(block, payload.len())?;
                }
                return Ok(Some(Packet {
                    block,
                    payload: payload.freeze(),
                }));
            }
            ESCAPE if escaping && !pending_escape => pending_escape = true,
            _ => {
                let value = if pending_escape {
                    byte ^ ESCAPE_XOR
                } else {
                    byte
                };
                pending_escape = false;
                payload.put_u8(value);
            }
        }

        if payload.len() > config.max_payload_size {
            src.advance(idx + 1);
            return Err(FrameError::PayloadExceedsLimit {
                size: payload.len(),
                max: config.max_payload_size,
            });
        }
    }

    Ok(None) // Need more data
}
