use plotlink_frame::{Axis, BlockType, Packet, Role};

use crate::error::{ProgramError, Result};
use crate::opcode::Opcode;

/// One axis of a program: opcodes plus three parallel parameter sequences.
///
/// All four sequences have the same length; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisProgram {
    axis: Axis,
    instructions: Vec<u8>,
    params: [Vec<u8>; 3],
}

impl AxisProgram {
    /// Build an axis from typed opcodes and raw parameter bytes.
    pub fn new(
        axis: Axis,
        instructions: &[Opcode],
        param_a: Vec<u8>,
        param_b: Vec<u8>,
        param_c: Vec<u8>,
    ) -> Result<Self> {
        let instructions = instructions.iter().map(|op| op.as_u8()).collect();
        let program = Self {
            axis,
            instructions,
            params: [param_a, param_b, param_c],
        };
        program.validate()?;
        Ok(program)
    }

    /// Build an axis from wire payloads, checking every opcode byte.
    pub fn from_raw(
        axis: Axis,
        instructions: Vec<u8>,
        param_a: Vec<u8>,
        param_b: Vec<u8>,
        param_c: Vec<u8>,
    ) -> Result<Self> {
        if let Some(index) = instructions
            .iter()
            .position(|&b| Opcode::from_u8(b).is_none())
        {
            return Err(ProgramError::UnknownOpcode {
                axis,
                index,
                byte: instructions[index],
            });
        }
        let program = Self {
            axis,
            instructions,
            params: [param_a, param_b, param_c],
        };
        program.validate()?;
        Ok(program)
    }

    /// Check that every parameter sequence matches the instruction count.
    pub fn validate(&self) -> Result<()> {
        let expected = self.instructions.len();
        for (role, param) in PARAM_ROLES.iter().zip(self.params.iter()) {
            if param.len() != expected {
                return Err(ProgramError::LengthMismatch {
                    axis: self.axis,
                    role: *role,
                    expected,
                    actual: param.len(),
                });
            }
        }
        Ok(())
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn opcodes(&self) -> impl Iterator<Item = Opcode> + '_ {
        self.instructions.iter().filter_map(|&b| Opcode::from_u8(b))
    }

    /// Raw bytes of one sequence, exactly as they go into a packet.
    pub fn block(&self, role: Role) -> &[u8] {
        match role {
            Role::Instructions => &self.instructions,
            Role::ParamA => &self.params[0],
            Role::ParamB => &self.params[1],
            Role::ParamC => &self.params[2],
        }
    }

    /// Mutable access to one parameter sequence. Length cannot change.
    pub(crate) fn param_mut(&mut self, role: Role) -> Result<&mut [u8]> {
        match role {
            Role::Instructions => Err(ProgramError::NotAParameter(role)),
            Role::ParamA => Ok(self.params[0].as_mut_slice()),
            Role::ParamB => Ok(self.params[1].as_mut_slice()),
            Role::ParamC => Ok(self.params[2].as_mut_slice()),
        }
    }
}

const PARAM_ROLES: [Role; 3] = [Role::ParamA, Role::ParamB, Role::ParamC];

/// One complete frame: both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    a: AxisProgram,
    b: AxisProgram,
}

impl Program {
    /// Pair the two axis programs of one frame.
    pub fn new(a: AxisProgram, b: AxisProgram) -> Result<Self> {
        a.validate()?;
        b.validate()?;
        Ok(Self { a, b })
    }

    pub fn axis(&self, axis: Axis) -> &AxisProgram {
        match axis {
            Axis::A => &self.a,
            Axis::B => &self.b,
        }
    }

    pub(crate) fn axis_mut(&mut self, axis: Axis) -> &mut AxisProgram {
        match axis {
            Axis::A => &mut self.a,
            Axis::B => &mut self.b,
        }
    }

    /// Re-check the equal-length invariant on both axes.
    pub fn validate(&self) -> Result<()> {
        self.a.validate()?;
        self.b.validate()
    }

    /// All eight blocks in emission order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockType, &[u8])> + '_ {
        BlockType::ALL
            .into_iter()
            .map(move |block| (block, self.axis(block.axis()).block(block.role())))
    }

    /// All eight blocks as owned packets.
    pub fn packets(&self) -> Vec<Packet> {
        self.blocks()
            .map(|(block, payload)| Packet::new(block, payload.to_vec()))
            .collect()
    }
}
