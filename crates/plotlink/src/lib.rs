//! Animated drawing programs for a two-axis actuator, streamed over a serial line.
//!
//! Every tick the driver advances a counter, rebuilds a small drawing program
//! for each axis, and sends it as eight marker-delimited packets.
//!
//! # Crate Structure
//!
//! - [`transport`]: the output channel (serial port or stdout)
//! - [`frame`]: block types and the packet wire format
//! - [`program`]: opcodes, templates and the program builder
//! - [`driver`]: counter oscillator, tick scheduler and frame loop

/// Re-export transport types.
pub mod transport {
    pub use plotlink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use plotlink_frame::*;
}

/// Re-export program types.
pub mod program {
    pub use plotlink_program::*;
}

/// Re-export driver types.
pub mod driver {
    pub use plotlink_driver::*;
}
