use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::link::SerialLink;

/// Line rate the actuator firmware listens on.
pub const DEFAULT_BAUD_RATE: u32 = 921_600;

/// Endpoint name that selects the stdout sink instead of a device.
pub const STDOUT_ENDPOINT: &str = "-";

/// One-time line configuration applied when the link is opened.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Baud rate. Default: 921600.
    pub baud_rate: u32,
    /// Blocking write timeout. Default: 1 s.
    pub write_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            write_timeout: Duration::from_secs(1),
        }
    }
}

/// Open a serial device with the given configuration.
pub fn open(path: &str, config: &LinkConfig) -> Result<SerialLink> {
    if config.baud_rate == 0 {
        return Err(TransportError::InvalidBaudRate(config.baud_rate));
    }

    let port = serialport::new(path, config.baud_rate)
        .timeout(config.write_timeout)
        .open()
        .map_err(|source| TransportError::Open {
            path: path.to_string(),
            source,
        })?;

    info!(path, baud = config.baud_rate, "serial link opened");
    Ok(SerialLink::from_port(path, port))
}

/// Open either a serial device or, for `-`, the stdout sink.
pub fn open_endpoint(endpoint: &str, config: &LinkConfig) -> Result<SerialLink> {
    if endpoint == STDOUT_ENDPOINT {
        debug!("writing frames to stdout");
        return Ok(SerialLink::stdout());
    }
    open(endpoint, config)
}

/// A serial device visible to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub kind: &'static str,
    pub description: Option<String>,
}

/// Enumerate serial devices.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports.into_iter().map(port_info).collect())
}

fn port_info(port: serialport::SerialPortInfo) -> PortInfo {
    let (kind, description) = match port.port_type {
        serialport::SerialPortType::UsbPort(usb) => {
            let product = usb.product.or(usb.manufacturer);
            let ids = format!("{:04x}:{:04x}", usb.vid, usb.pid);
            let description = match product {
                Some(product) => format!("{product} ({ids})"),
                None => ids,
            };
            ("usb", Some(description))
        }
        serialport::SerialPortType::PciPort => ("pci", None),
        serialport::SerialPortType::BluetoothPort => ("bluetooth", None),
        serialport::SerialPortType::Unknown => ("unknown", None),
    };
    PortInfo {
        name: port.port_name,
        kind,
        description,
    }
}
