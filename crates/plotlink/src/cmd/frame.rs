use plotlink_frame::{FrameConfig, PacketWriter};
use plotlink_program::ProgramBuilder;

use crate::cmd::{marker_policy, FrameArgs};
use crate::exit::{frame_error, program_error, CliResult, SUCCESS};
use crate::output::{print_frame, FrameView, OutputFormat};

pub fn run(args: FrameArgs, format: OutputFormat) -> CliResult<i32> {
    let program = ProgramBuilder::primary()
        .build(args.counter)
        .map_err(|err| program_error("build failed", err))?;

    let config = FrameConfig {
        marker_policy: marker_policy(args.raw_markers),
        yield_after_packet: false,
        ..FrameConfig::default()
    };
    let policy = config.marker_policy;
    let mut writer = PacketWriter::with_config(Vec::new(), config);
    writer
        .emit_frame(program.blocks())
        .map_err(|err| frame_error("encode failed", err))?;
    let wire = writer.into_inner();

    let packets = program.packets();
    print_frame(
        &FrameView {
            counter: args.counter,
            policy,
            packets: &packets,
            wire: &wire,
        },
        format,
    );
    Ok(SUCCESS)
}
