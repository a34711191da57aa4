use plotlink_frame::FrameError;
use plotlink_program::ProgramError;

/// Errors that can occur while driving the animation.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The frame could not be built.
    #[error("program error: {0}")]
    Program(#[from] ProgramError),

    /// The frame could not be encoded or sent.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Too many consecutive frames failed on the output channel.
    #[error("output channel failed {count} consecutive times, last: {last}")]
    ChannelFailures {
        count: u32,
        #[source]
        last: FrameError,
    },

    /// Oscillator bounds are empty or inverted.
    #[error("invalid bounds: lower {lower} must be below upper {upper}")]
    InvalidBounds { lower: u8, upper: u8 },
}

impl DriverError {
    /// True when the output channel, not the frame content, failed.
    pub fn is_channel_failure(&self) -> bool {
        match self {
            DriverError::Frame(err) => err.is_channel_failure(),
            DriverError::ChannelFailures { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
