use plotlink_frame::{Axis, BlockType, FrameError, Role};

/// Errors that can occur while building or reassembling a program.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// The sequences of one axis-frame differ in length.
    #[error("axis {axis} {role} has {actual} entries, instructions have {expected}")]
    LengthMismatch {
        axis: Axis,
        role: Role,
        expected: usize,
        actual: usize,
    },

    /// A computed parameter does not fit in one byte.
    #[error("axis {axis} {role}[{index}] = {value} is outside 0..=255")]
    ValueOutOfRange {
        axis: Axis,
        role: Role,
        index: usize,
        value: i32,
    },

    /// An instruction byte is not a known opcode.
    #[error("axis {axis} instruction {index} has unknown opcode {byte:#04x}")]
    UnknownOpcode { axis: Axis, index: usize, byte: u8 },

    /// An override targets indices past the end of a sequence.
    #[error("override of {role} up to index {end} exceeds sequence length {len}")]
    OverrideOutOfBounds { role: Role, end: usize, len: usize },

    /// Overrides may only rewrite parameter sequences.
    #[error("{0} is not a parameter sequence")]
    NotAParameter(Role),

    /// A packet arrived out of the fixed emission order.
    #[error("expected {expected} packet, got {got}")]
    UnexpectedBlock { expected: BlockType, got: BlockType },

    /// Frame-level error while reading packets.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, ProgramError>;
