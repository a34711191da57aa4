//! Block types.
//!
//! One block type per (axis, role) pair. The numeric value is the packet's
//! type byte; [`BlockType::ALL`] is also the fixed per-frame emission order.

use std::fmt;

use crate::error::FrameError;

/// Output axis of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    A,
    B,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::A, Axis::B];

    pub fn name(self) -> &'static str {
        match self {
            Axis::A => "A",
            Axis::B => "B",
        }
    }
}

/// What a block carries for its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Instructions,
    ParamA,
    ParamB,
    ParamC,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Instructions, Role::ParamA, Role::ParamB, Role::ParamC];

    pub fn name(self) -> &'static str {
        match self {
            Role::Instructions => "instructions",
            Role::ParamA => "param-a",
            Role::ParamB => "param-b",
            Role::ParamC => "param-c",
        }
    }

    const fn index(self) -> u8 {
        match self {
            Role::Instructions => 0,
            Role::ParamA => 1,
            Role::ParamB => 2,
            Role::ParamC => 3,
        }
    }
}

/// Packet type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockType {
    AInstructions = 0x00,
    AParamA = 0x01,
    AParamB = 0x02,
    AParamC = 0x03,
    BInstructions = 0x04,
    BParamA = 0x05,
    BParamB = 0x06,
    BParamC = 0x07,
}

impl BlockType {
    /// Every block type, in per-frame emission order.
    pub const ALL: [BlockType; 8] = [
        BlockType::AInstructions,
        BlockType::AParamA,
        BlockType::AParamB,
        BlockType::AParamC,
        BlockType::BInstructions,
        BlockType::BParamA,
        BlockType::BParamB,
        BlockType::BParamC,
    ];

    pub const fn new(axis: Axis, role: Role) -> Self {
        let base = match axis {
            Axis::A => 0,
            Axis::B => 4,
        };
        Self::ALL[(base + role.index()) as usize]
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < Self::ALL.len() {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn axis(self) -> Axis {
        if self.as_u8() < 4 {
            Axis::A
        } else {
            Axis::B
        }
    }

    pub const fn role(self) -> Role {
        match self.as_u8() % 4 {
            0 => Role::Instructions,
            1 => Role::ParamA,
            2 => Role::ParamB,
            _ => Role::ParamC,
        }
    }

    /// Position of this block in the emission order.
    pub const fn index(self) -> usize {
        self.as_u8() as usize
    }
}

impl TryFrom<u8> for BlockType {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(FrameError::UnknownBlockType(value))
    }
}

impl From<BlockType> for u8 {
    fn from(block: BlockType) -> Self {
        block.as_u8()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.axis().name(), self.role().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_bytes_match_wire_table() {
        let bytes: Vec<u8> = BlockType::ALL.iter().map(|b| b.as_u8()).collect();
        assert_eq!(bytes, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn axis_and_role_round_trip() {
        for axis in Axis::ALL {
            for role in Role::ALL {
                let block = BlockType::new(axis, role);
                assert_eq!(block.axis(), axis);
                assert_eq!(block.role(), role);
            }
        }
        assert_eq!(BlockType::new(Axis::B, Role::ParamA), BlockType::BParamA);
        assert_eq!(BlockType::new(Axis::A, Role::ParamC).as_u8(), 0x03);
    }

    #[test]
    fn unknown_type_byte_rejected() {
        assert!(matches!(
            BlockType::try_from(0x08),
            Err(FrameError::UnknownBlockType(0x08))
        ));
        assert_eq!(BlockType::try_from(0x06).unwrap(), BlockType::BParamB);
    }

    #[test]
    fn display_names_axis_and_role() {
        assert_eq!(BlockType::AInstructions.to_string(), "A/instructions");
        assert_eq!(BlockType::BParamC.to_string(), "B/param-c");
    }
}
