use std::io::Write;
use std::time::Duration;

use crate::error::{Result, TransportError};

/// The single outbound channel of a sender. Implements `Write`.
///
/// On hardware this wraps an open serial port; for capture and diagnostics
/// it can also be stdout.
pub struct SerialLink {
    inner: LinkInner,
}

enum LinkInner {
    Serial {
        path: String,
        port: Box<dyn serialport::SerialPort>,
    },
    Stdout(std::io::Stdout),
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkInner::Serial { port, .. } => port.write(buf),
            LinkInner::Stdout(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            LinkInner::Serial { port, .. } => port.flush(),
            LinkInner::Stdout(out) => out.flush(),
        }
    }
}

impl SerialLink {
    /// Wrap an already opened serial port.
    pub(crate) fn from_port(path: impl Into<String>, port: Box<dyn serialport::SerialPort>) -> Self {
        Self {
            inner: LinkInner::Serial {
                path: path.into(),
                port,
            },
        }
    }

    /// A link that writes to the process stdout.
    pub fn stdout() -> Self {
        Self {
            inner: LinkInner::Stdout(std::io::stdout()),
        }
    }

    /// Human-readable endpoint name, used in logs.
    pub fn endpoint(&self) -> &str {
        match &self.inner {
            LinkInner::Serial { path, .. } => path,
            LinkInner::Stdout(_) => "-",
        }
    }

    /// Baud rate of the underlying line, if this is a serial port.
    pub fn baud_rate(&self) -> Option<u32> {
        match &self.inner {
            LinkInner::Serial { port, .. } => port.baud_rate().ok(),
            LinkInner::Stdout(_) => None,
        }
    }

    /// Set the blocking write timeout. A no-op for stdout.
    pub fn set_write_timeout(&mut self, timeout: Duration) -> Result<()> {
        match &mut self.inner {
            LinkInner::Serial { path, port } => {
                port.set_timeout(timeout)
                    .map_err(|source| TransportError::Configure {
                        path: path.clone(),
                        source,
                    })
            }
            LinkInner::Stdout(_) => Ok(()),
        }
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            LinkInner::Serial { path, .. } => f
                .debug_struct("SerialLink")
                .field("type", &"serial")
                .field("path", path)
                .finish(),
            LinkInner::Stdout(_) => f.debug_struct("SerialLink").field("type", &"stdout").finish(),
        }
    }
}
