use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use plotlink_driver::RunSummary;
use plotlink_frame::{MarkerPolicy, Packet};
use plotlink_transport::PortInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One built frame, ready for display.
pub struct FrameView<'a> {
    pub counter: u8,
    pub policy: MarkerPolicy,
    pub packets: &'a [Packet],
    pub wire: &'a [u8],
}

#[derive(Serialize)]
struct BlockOutput<'a> {
    block: String,
    #[serde(rename = "type")]
    type_byte: u8,
    len: usize,
    wire_size: usize,
    payload: &'a [u8],
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    counter: u8,
    marker_policy: &'a str,
    wire_size: usize,
    blocks: Vec<BlockOutput<'a>>,
    wire: String,
}

pub fn print_frame(view: &FrameView<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                counter: view.counter,
                marker_policy: view.policy.name(),
                wire_size: view.wire.len(),
                blocks: view
                    .packets
                    .iter()
                    .map(|p| BlockOutput {
                        block: p.block.to_string(),
                        type_byte: p.block.as_u8(),
                        len: p.payload.len(),
                        wire_size: p.wire_size(view.policy),
                        payload: p.payload.as_ref(),
                    })
                    .collect(),
                wire: hex(view.wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["BLOCK", "TYPE", "LEN", "PAYLOAD"]);
            for p in view.packets {
                table.add_row(vec![
                    p.block.to_string(),
                    format!("{:#04x}", p.block.as_u8()),
                    p.payload.len().to_string(),
                    decimal(p.payload.as_ref()),
                ]);
            }
            println!("{table}");
            println!(
                "counter={} markers={} wire_size={}",
                view.counter,
                view.policy.name(),
                view.wire.len()
            );
        }
        OutputFormat::Pretty => {
            println!(
                "counter={} markers={} wire_size={}",
                view.counter,
                view.policy.name(),
                view.wire.len()
            );
            for p in view.packets {
                println!(
                    "{:<16} {:#04x} [{}]",
                    p.block.to_string(),
                    p.block.as_u8(),
                    decimal(p.payload.as_ref())
                );
            }
        }
        OutputFormat::Raw => print_raw(view.wire),
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    description: Option<&'a str>,
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<PortOutput<'_>> = ports
                .iter()
                .map(|p| PortOutput {
                    name: &p.name,
                    kind: p.kind,
                    description: p.description.as_deref(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "DESCRIPTION"]);
            for p in ports {
                table.add_row(vec![
                    p.name.clone(),
                    p.kind.to_string(),
                    p.description.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for p in ports {
                match &p.description {
                    Some(desc) => println!("{} ({}) {desc}", p.name, p.kind),
                    None => println!("{} ({})", p.name, p.kind),
                }
            }
        }
    }
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    port: &'a str,
    frames_sent: u64,
    frames_skipped: u64,
    bytes_sent: u64,
}

pub fn print_summary(port: &str, summary: &RunSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SummaryOutput {
                port,
                frames_sent: summary.frames_sent,
                frames_skipped: summary.frames_skipped,
                bytes_sent: summary.bytes_sent,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "SENT", "SKIPPED", "BYTES"])
                .add_row(vec![
                    port.to_string(),
                    summary.frames_sent.to_string(),
                    summary.frames_skipped.to_string(),
                    summary.bytes_sent.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!(
                "port={port} sent={} skipped={} bytes={}",
                summary.frames_sent, summary.frames_skipped, summary.bytes_sent
            );
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

fn decimal(data: &[u8]) -> String {
    data.iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(hex(&[0xaa, 0x00, 0x7d, 0x55]), "aa007d55");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn decimal_is_space_separated() {
        assert_eq!(decimal(&[1, 100, 255]), "1 100 255");
    }
}
