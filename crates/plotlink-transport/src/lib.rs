//! Output channel abstraction for plotlink.
//!
//! The sender owns exactly one outbound byte stream:
//! - a serial line (UART over USB, configured once at open time)
//! - stdout, for piping frames into capture tools
//!
//! This is the lowest layer of plotlink. Everything else writes through the
//! [`SerialLink`] type provided here.

pub mod error;
pub mod link;
pub mod serial;

pub use error::{Result, TransportError};
pub use link::SerialLink;
pub use serial::{
    available_ports, open, open_endpoint, LinkConfig, PortInfo, DEFAULT_BAUD_RATE, STDOUT_ENDPOINT,
};
