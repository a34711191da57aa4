use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use plotlink_frame::{FrameConfig, FrameError, PacketWriter};
use plotlink_program::ProgramBuilder;
use tracing::{debug, info, warn};

use crate::error::{DriverError, Result};
use crate::oscillator::{Direction, Oscillator, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};
use crate::ticker::Ticker;

/// Default interval between frames.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(30);

/// Driver loop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Interval between frame starts.
    pub period: Duration,
    pub lower_bound: u8,
    pub upper_bound: u8,
    /// Counter value before the first tick.
    pub start: u8,
    /// Stop after this many ticks (sent or skipped). Unbounded when `None`.
    pub max_frames: Option<u64>,
    /// Give up after this many consecutive channel failures. Unbounded when `None`.
    pub max_channel_failures: Option<u32>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            start: DEFAULT_LOWER_BOUND,
            max_frames: None,
            max_channel_failures: None,
        }
    }
}

/// Outcome of one transmitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Zero-based index of the tick that produced this frame.
    pub sequence: u64,
    pub counter: u8,
    pub direction: Direction,
    /// Bytes written to the channel, markers included.
    pub bytes: usize,
}

/// Totals for one call to [`Driver::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_sent: u64,
    pub frames_skipped: u64,
    pub bytes_sent: u64,
}

impl RunSummary {
    pub fn ticks(&self) -> u64 {
        self.frames_sent + self.frames_skipped
    }
}

/// Streams one program frame per tick to a single output channel.
pub struct Driver<W: Write> {
    writer: PacketWriter<W>,
    builder: ProgramBuilder,
    oscillator: Oscillator,
    config: DriverConfig,
    sequence: u64,
}

impl<W: Write> Driver<W> {
    /// Primary program, default framing.
    pub fn new(inner: W, config: DriverConfig) -> Result<Self> {
        Self::with_parts(
            PacketWriter::with_config(inner, FrameConfig::default()),
            ProgramBuilder::primary(),
            config,
        )
    }

    pub fn with_parts(
        writer: PacketWriter<W>,
        builder: ProgramBuilder,
        config: DriverConfig,
    ) -> Result<Self> {
        if config.lower_bound >= config.upper_bound {
            return Err(DriverError::InvalidBounds {
                lower: config.lower_bound,
                upper: config.upper_bound,
            });
        }
        let oscillator = Oscillator::new(config.start, config.lower_bound, config.upper_bound);
        Ok(Self {
            writer,
            builder,
            oscillator,
            config,
            sequence: 0,
        })
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn writer(&self) -> &PacketWriter<W> {
        &self.writer
    }

    pub fn into_writer(self) -> PacketWriter<W> {
        self.writer
    }

    /// Advance the counter, build the program and send its eight packets.
    ///
    /// Nothing is written when the program cannot be built or encoded. The
    /// counter still moves, so a skipped frame does not stall the animation.
    pub fn tick(&mut self) -> Result<FrameReport> {
        let sequence = self.sequence;
        self.sequence += 1;

        let counter = self.oscillator.advance();
        let program = self.builder.build(counter)?;
        let bytes = self.writer.emit_frame(program.blocks())?;

        debug!(sequence, counter, direction = %self.oscillator.direction(), bytes, "frame sent");
        Ok(FrameReport {
            sequence,
            counter,
            direction: self.oscillator.direction(),
            bytes,
        })
    }

    /// Tick at the configured period until `stop` is raised or the frame
    /// budget is spent.
    ///
    /// Frame errors are logged and skipped. Only a run of consecutive channel
    /// failures longer than `max_channel_failures` ends the loop with an error.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<RunSummary> {
        let mut ticker = Ticker::new(self.config.period);
        let mut summary = RunSummary::default();
        let mut consecutive_failures = 0u32;

        info!(
            period_ms = self.config.period.as_millis() as u64,
            start = self.oscillator.counter(),
            lower = self.config.lower_bound,
            upper = self.config.upper_bound,
            "driver started"
        );

        while !stop.load(Ordering::SeqCst) {
            if self
                .config
                .max_frames
                .is_some_and(|max| summary.ticks() >= max)
            {
                break;
            }

            match self.tick() {
                Ok(report) => {
                    consecutive_failures = 0;
                    summary.frames_sent += 1;
                    summary.bytes_sent += report.bytes as u64;
                }
                Err(DriverError::Frame(err)) if err.is_channel_failure() => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    summary.frames_skipped += 1;
                    warn!(
                        counter = self.oscillator.counter(),
                        consecutive = consecutive_failures,
                        error = %err,
                        "frame skipped, output channel failed"
                    );
                    if let Some(limit) = self.config.max_channel_failures {
                        if consecutive_failures >= limit {
                            return Err(channel_failures(consecutive_failures, err));
                        }
                    }
                }
                Err(err) => {
                    consecutive_failures = 0;
                    summary.frames_skipped += 1;
                    warn!(counter = self.oscillator.counter(), error = %err, "frame skipped");
                }
            }

            if self
                .config
                .max_frames
                .is_some_and(|max| summary.ticks() >= max)
            {
                break;
            }
            ticker.wait();
        }

        info!(
            sent = summary.frames_sent,
            skipped = summary.frames_skipped,
            bytes = summary.bytes_sent,
            overruns = ticker.overruns(),
            "driver stopped"
        );
        Ok(summary)
    }
}

fn channel_failures(count: u32, last: FrameError) -> DriverError {
    DriverError::ChannelFailures { count, last }
}
