mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "plotlink", version, about = "Stream drawing programs to a serial actuator")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "PLOTLINK_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stream_subcommand() {
        let cli = Cli::try_parse_from([
            "plotlink",
            "stream",
            "/dev/ttyUSB0",
            "--baud",
            "115200",
            "--period",
            "10ms",
            "--frames",
            "5",
            "--raw-markers",
        ])
        .expect("stream args should parse");

        match cli.command {
            Command::Stream(args) => {
                assert_eq!(args.port, "/dev/ttyUSB0");
                assert_eq!(args.baud, 115_200);
                assert_eq!(args.frames, Some(5));
                assert!(args.raw_markers);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn stream_defaults_to_primary_settings() {
        let cli = Cli::try_parse_from(["plotlink", "stream", "-"]).expect("stream should parse");
        match cli.command {
            Command::Stream(args) => {
                assert_eq!(args.baud, 921_600);
                assert_eq!(args.period, "30ms");
                assert_eq!(args.start, 30);
                assert!(args.frames.is_none());
                assert!(!args.raw_markers);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_counter_outside_byte() {
        let err = Cli::try_parse_from(["plotlink", "frame", "--counter", "300"])
            .expect_err("counter above 255 should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["plotlink", "ports", "--format", "json"])
            .expect("ports args should parse");
        assert!(matches!(cli.command, Command::Ports(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
