/// Errors that can occur while opening or driving the output channel.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// Failed to enumerate serial devices.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(serialport::Error),

    /// Failed to change a line setting after open.
    #[error("failed to configure {path}: {source}")]
    Configure {
        path: String,
        source: serialport::Error,
    },

    /// The requested baud rate is not usable.
    #[error("invalid baud rate {0}")]
    InvalidBaudRate(u32),

    /// An I/O error occurred on the channel.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
