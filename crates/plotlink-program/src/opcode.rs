//! Instruction set understood by the actuator firmware.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0x00,
    Line = 0x01,
    Increment = 0x02,
    Decrement = 0x03,
    Jump = 0x04,
    RectA = 0x05,
    RectB = 0x06,
    LineDashed = 0x07,
}

impl Opcode {
    pub const ALL: [Opcode; 8] = [
        Opcode::Nop,
        Opcode::Line,
        Opcode::Increment,
        Opcode::Decrement,
        Opcode::Jump,
        Opcode::RectA,
        Opcode::RectB,
        Opcode::LineDashed,
    ];

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

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Line => "LINE",
            Opcode::Increment => "INCREMENT",
            Opcode::Decrement => "DECREMENT",
            Opcode::Jump => "JUMP",
            Opcode::RectA => "RECT_A",
            Opcode::RectB => "RECT_B",
            Opcode::LineDashed => "LINE_DASHED",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op.as_u8()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_values() {
        assert_eq!(Opcode::Nop.as_u8(), 0x00);
        assert_eq!(Opcode::Jump.as_u8(), 0x04);
        assert_eq!(Opcode::RectB.as_u8(), 0x06);
        assert_eq!(Opcode::LineDashed.as_u8(), 0x07);
    }

    #[test]
    fn from_u8_covers_instruction_set() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_u8(op.as_u8()), Some(op));
        }
        assert_eq!(Opcode::from_u8(0x08), None);
        assert_eq!(Opcode::from_u8(0xFF), None);
    }
}
