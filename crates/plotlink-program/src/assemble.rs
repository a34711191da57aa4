use std::io::Read;

use bytes::Bytes;
use plotlink_frame::{Axis, BlockType, Packet, PacketReader};
use tracing::debug;

use crate::error::{ProgramError, Result};
use crate::program::{AxisProgram, Program};

/// Receiver-side reassembly of a frame from its eight packets.
///
/// Packets must arrive in emission order. An out-of-order packet discards
/// the partial frame; if it is an axis-A instruction block it starts the
/// next one.
#[derive(Debug, Default)]
pub struct ProgramAssembler {
    blocks: Vec<Bytes>,
}

impl ProgramAssembler {
    pub fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(BlockType::ALL.len()),
        }
    }

    /// Number of blocks collected for the current frame.
    pub fn pending(&self) -> usize {
        self.blocks.len()
    }

    pub fn reset(&mut self) {
        self.blocks.clear();
    }

    /// Feed one packet. Returns the program once the eighth block arrives.
    pub fn push(&mut self, packet: Packet) -> Result<Option<Program>> {
        let expected = BlockType::ALL[self.blocks.len()];
        if packet.block != expected {
            debug!(%expected, got = %packet.block, dropped = self.blocks.len(), "frame out of order");
            self.blocks.clear();
            if packet.block == BlockType::AInstructions {
                self.blocks.push(packet.payload);
            }
            return Err(ProgramError::UnexpectedBlock {
                expected,
                got: packet.block,
            });
        }

        self.blocks.push(packet.payload);
        if self.blocks.len() < BlockType::ALL.len() {
            return Ok(None);
        }

        let blocks = std::mem::take(&mut self.blocks);
        let mut parts = blocks.into_iter().map(|b| b.to_vec());
        let mut next_axis = |axis: Axis| -> Result<AxisProgram> {
            let mut take = || parts.next().unwrap_or_default();
            let instructions = take();
            let param_a = take();
            let param_b = take();
            let param_c = take();
            AxisProgram::from_raw(axis, instructions, param_a, param_b, param_c)
        };
        let a = next_axis(Axis::A)?;
        let b = next_axis(Axis::B)?;
        Program::new(a, b).map(Some)
    }

    /// Read packets until one full frame has been assembled.
    pub fn read_from<R: Read>(&mut self, reader: &mut PacketReader<R>) -> Result<Program> {
        loop {
            let packet = reader.read_packet()?;
            if let Some(program) = self.push(packet)? {
                return Ok(program);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use plotlink_frame::{FrameConfig, PacketWriter, Role};

    use super::*;
    use crate::builder::ProgramBuilder;

    fn wire_for(program: &Program) -> Vec<u8> {
        let mut writer = PacketWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.emit_frame(program.blocks()).unwrap();
        writer.into_inner().into_inner()
    }

    #[test]
    fn reassembles_emitted_frame() {
        let program = ProgramBuilder::primary().build(85).unwrap();
        let wire = wire_for(&program);

        let mut reader = PacketReader::new(Cursor::new(wire));
        let mut assembler = ProgramAssembler::new();
        let decoded = assembler.read_from(&mut reader).unwrap();

        assert_eq!(decoded, program);
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn out_of_order_packet_resets() {
        let program = ProgramBuilder::primary().build(40).unwrap();
        let packets = program.packets();
        let mut assembler = ProgramAssembler::new();

        assert!(assembler.push(packets[0].clone()).unwrap().is_none());
        let err = assembler.push(packets[2].clone()).unwrap_err();
        assert!(matches!(
            err,
            ProgramError::UnexpectedBlock {
                expected: BlockType::AParamA,
                got: BlockType::AParamB,
            }
        ));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn instruction_block_restarts_frame() {
        let program = ProgramBuilder::primary().build(40).unwrap();
        let packets = program.packets();
        let mut assembler = ProgramAssembler::new();

        assembler.push(packets[0].clone()).unwrap();
        assembler.push(packets[1].clone()).unwrap();
        assert!(assembler.push(packets[0].clone()).is_err());
        assert_eq!(assembler.pending(), 1);

        let mut result = None;
        for packet in packets.into_iter().skip(1) {
            result = assembler.push(packet).unwrap();
        }
        assert_eq!(result, Some(program));
    }

    #[test]
    fn mismatched_lengths_detected_on_receive() {
        let mut assembler = ProgramAssembler::new();
        let mut result = Ok(None);
        for block in BlockType::ALL {
            let len = if block == BlockType::BParamB { 3 } else { 4 };
            let payload = if block.role() == Role::Instructions {
                vec![1u8; len]
            } else {
                vec![10u8; len]
            };
            result = assembler.push(Packet::new(block, payload));
        }
        assert!(matches!(
            result,
            Err(ProgramError::LengthMismatch {
                axis: Axis::B,
                role: Role::ParamB,
                expected: 4,
                actual: 3,
            })
        ));
        assert_eq!(assembler.pending(), 0);
    }

    #[test]
    fn frame_errors_propagate() {
        let mut reader =
            PacketReader::with_config(Cursor::new(Vec::<u8>::new()), FrameConfig::default());
        let err = ProgramAssembler::new().read_from(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            ProgramError::Frame(plotlink_frame::FrameError::ConnectionClosed)
        ));
    }
}
