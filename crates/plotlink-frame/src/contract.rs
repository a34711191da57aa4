use crate::block::BlockType;
use crate::error::{FrameError, Result};

/// Payload length agreed between sender and receiver, per block type.
///
/// The wire format carries no length field, so the firmware sizes its
/// buffers from this table. `version` changes whenever a length does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthContract {
    pub version: u8,
    lengths: [usize; 8],
}

impl LengthContract {
    /// 16 steps per axis, the program size the actuator firmware expects.
    pub const PRIMARY: LengthContract = LengthContract::uniform(1, 16);

    pub const fn new(version: u8, lengths: [usize; 8]) -> Self {
        Self { version, lengths }
    }

    /// Same length for every block.
    pub const fn uniform(version: u8, len: usize) -> Self {
        Self {
            version,
            lengths: [len; 8],
        }
    }

    pub const fn expected_len(&self, block: BlockType) -> usize {
        self.lengths[block.index()]
    }

    /// Reject a payload whose length differs from the contract.
    pub fn check(&self, block: BlockType, actual: usize) -> Result<()> {
        let expected = self.expected_len(block);
        if actual != expected {
            return Err(FrameError::LengthMismatch {
                block,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
