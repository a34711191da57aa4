#![cfg(feature = "cli")]

use std::io::Cursor;
use std::process::Command;

use plotlink::frame::{PacketReader, END_MARKER, START_MARKER};
use plotlink::program::{ProgramAssembler, ProgramBuilder};

fn plotlink() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plotlink"));
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn frame_json_reports_eight_blocks() {
    let output = plotlink()
        .args(["--format", "json", "frame", "--counter", "100"])
        .output()
        .expect("frame should run");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(value["counter"], 100);
    assert_eq!(value["marker_policy"], "escaped");
    let blocks = value["blocks"].as_array().expect("blocks array");
    assert_eq!(blocks.len(), 8);
    assert_eq!(blocks[0]["block"], "A/instructions");
    assert_eq!(blocks[0]["type"], 0);
    assert_eq!(
        blocks[0]["payload"],
        serde_json::json!([1, 1, 7, 4, 5, 4, 5, 1, 1, 4, 5, 4, 5, 4, 5, 1])
    );
    for block in blocks {
        assert_eq!(block["len"], 16);
    }
}

#[test]
fn frame_raw_output_decodes_to_same_program() {
    let output = plotlink()
        .args(["--format", "raw", "frame", "--counter", "85"])
        .output()
        .expect("frame should run");
    assert!(output.status.success());

    let mut reader = PacketReader::new(Cursor::new(output.stdout));
    let program = ProgramAssembler::new()
        .read_from(&mut reader)
        .expect("stdout should hold one frame");
    assert_eq!(program, ProgramBuilder::primary().build(85).unwrap());
}

#[test]
fn frame_with_raw_markers_rejects_colliding_payload() {
    let output = plotlink()
        .args(["frame", "--counter", "85", "--raw-markers"])
        .output()
        .expect("frame should run");

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("collides with a frame marker"), "{stderr}");
}

#[test]
fn stream_to_stdout_emits_requested_frames() {
    let output = plotlink()
        .args(["stream", "-", "--frames", "3", "--period", "1ms", "--start", "40"])
        .output()
        .expect("stream should run");
    assert!(output.status.success());

    let wire = output.stdout;
    assert_eq!(wire.iter().filter(|&&b| b == START_MARKER).count(), 24);
    assert_eq!(wire.iter().filter(|&&b| b == END_MARKER).count(), 24);

    let mut reader = PacketReader::new(Cursor::new(wire));
    let mut assembler = ProgramAssembler::new();
    for counter in 41..=43 {
        let program = assembler.read_from(&mut reader).expect("frame should decode");
        assert_eq!(program, ProgramBuilder::primary().build(counter).unwrap());
    }
}

#[test]
fn stream_to_missing_port_is_transport_error() {
    let output = plotlink()
        .args(["stream", "/dev/plotlink-does-not-exist", "--frames", "1"])
        .output()
        .expect("stream should run");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn invalid_period_is_usage_error() {
    let output = plotlink()
        .args(["stream", "-", "--period", "0ms"])
        .output()
        .expect("stream should run");
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}

#[test]
fn version_prints_package_version() {
    let output = plotlink().arg("version").output().expect("version should run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("plotlink {}", env!("CARGO_PKG_VERSION")));
}
