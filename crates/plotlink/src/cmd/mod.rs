use clap::{Args, Subcommand};
use plotlink_transport::DEFAULT_BAUD_RATE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod frame;
pub mod ports;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Animate the primary program and stream it to a port.
    Stream(StreamArgs),
    /// Build a single frame and print its blocks and wire bytes.
    Frame(FrameArgs),
    /// List serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Stream(args) => stream::run(args, format),
        Command::Frame(args) => frame::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Serial device path, or `-` to write packets to stdout.
    #[arg(env = "PLOTLINK_PORT")]
    pub port: String,
    /// Line speed in baud.
    #[arg(long, env = "PLOTLINK_BAUD", default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Interval between frames (e.g. 30ms, 1s).
    #[arg(long, default_value = "30ms")]
    pub period: String,
    /// Counter value before the first frame.
    #[arg(long, default_value_t = 30)]
    pub start: u8,
    /// Exit after N frames.
    #[arg(long)]
    pub frames: Option<u64>,
    /// Send payloads verbatim and skip frames whose payloads contain a marker byte.
    #[arg(long)]
    pub raw_markers: bool,
    /// Exit with an error after N consecutive output failures.
    #[arg(long, value_name = "N")]
    pub max_channel_failures: Option<u32>,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Animation counter to build the frame at.
    #[arg(long, default_value_t = 100)]
    pub counter: u8,
    /// Encode with the raw marker policy.
    #[arg(long)]
    pub raw_markers: bool,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn marker_policy(raw: bool) -> plotlink_frame::MarkerPolicy {
    if raw {
        plotlink_frame::MarkerPolicy::Raw
    } else {
        plotlink_frame::MarkerPolicy::Escaped
    }
}
