use crate::block::BlockType;

/// Errors that can occur during packet encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the configured maximum size.
    #[error("payload exceeds limit ({size} bytes, max {max})")]
    PayloadExceedsLimit { size: usize, max: usize },

    /// A payload byte equals a marker and the raw wire format cannot carry it.
    #[error("{block} payload byte {byte:#04x} at offset {offset} collides with a frame marker")]
    FramingAmbiguity {
        block: BlockType,
        offset: usize,
        byte: u8,
    },

    /// The payload length differs from the agreed length contract.
    #[error("{block} payload is {actual} bytes, contract expects {expected}")]
    LengthMismatch {
        block: BlockType,
        expected: usize,
        actual: usize,
    },

    /// The type byte does not name a known block.
    #[error("unknown block type {0:#04x}")]
    UnknownBlockType(u8),

    /// A new start marker arrived before the current packet's end marker.
    #[error("packet not terminated before next start marker")]
    UnterminatedPacket,

    /// An escape byte was followed by the end marker.
    #[error("dangling escape byte at end of packet")]
    InvalidEscape,

    /// The output channel is closed or refuses writes.
    #[error("output channel unavailable: {0}")]
    ChannelUnavailable(#[source] std::io::Error),

    /// An I/O error occurred while reading or writing packets.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a complete packet was received.
    #[error("connection closed (incomplete packet)")]
    ConnectionClosed,
}

impl FrameError {
    /// True when the error came from the output channel rather than the data.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, FrameError::ChannelUnavailable(_) | FrameError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
