use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use plotlink_driver::{Driver, DriverConfig};
use plotlink_frame::{FrameConfig, PacketWriter};
use plotlink_program::ProgramBuilder;
use plotlink_transport::{open_endpoint, LinkConfig, STDOUT_ENDPOINT};
use tracing::info;

use crate::cmd::{marker_policy, StreamArgs};
use crate::exit::{driver_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_summary, OutputFormat};

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    let period = parse_duration(&args.period)?;

    let link_config = LinkConfig {
        baud_rate: args.baud,
        ..LinkConfig::default()
    };
    let link = open_endpoint(&args.port, &link_config)
        .map_err(|err| transport_error("open failed", err))?;

    let frame_config = FrameConfig {
        marker_policy: marker_policy(args.raw_markers),
        ..FrameConfig::default()
    };
    let config = DriverConfig {
        period,
        start: args.start,
        max_frames: args.frames,
        max_channel_failures: args.max_channel_failures,
        ..DriverConfig::default()
    };
    let mut driver = Driver::with_parts(
        PacketWriter::with_config(link, frame_config),
        ProgramBuilder::primary(),
        config,
    )
    .map_err(|err| driver_error("driver setup failed", err))?;

    let stop = Arc::new(AtomicBool::new(false));
    install_ctrlc_handler(stop.clone())?;

    let summary = driver
        .run(&stop)
        .map_err(|err| driver_error("stream failed", err))?;

    // Stdout carries the packet stream; keep it clean.
    if args.port == STDOUT_ENDPOINT {
        info!(
            sent = summary.frames_sent,
            skipped = summary.frames_skipped,
            "stream finished"
        );
    } else {
        print_summary(&args.port, &summary, format);
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(stop: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        stop.store(true, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
