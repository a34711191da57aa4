//! Animation driver for the plotlink actuator.
//!
//! The driver owns the animation counter, rebuilds the drawing program on
//! every tick and streams it as one frame of eight packets.

pub mod driver;
pub mod error;
pub mod oscillator;
pub mod ticker;

pub use driver::{Driver, DriverConfig, FrameReport, RunSummary, DEFAULT_PERIOD};
pub use error::{DriverError, Result};
pub use oscillator::{Direction, Oscillator, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};
pub use ticker::Ticker;
