//! Drawing programs for the plotlink actuator.
//!
//! A program is, per axis, one opcode sequence plus three parameter
//! sequences of equal length. Opcode `i` pairs with parameter `i` of each
//! sequence. Programs are rebuilt every animation tick from a template and a
//! single counter, then sent as eight packets.

pub mod assemble;
pub mod builder;
pub mod error;
pub mod opcode;
pub mod overrides;
pub mod program;
pub mod template;

pub use assemble::ProgramAssembler;
pub use builder::ProgramBuilder;
pub use error::{ProgramError, Result};
pub use opcode::Opcode;
pub use overrides::ParamOverride;
pub use program::{AxisProgram, Program};
pub use template::{AxisTemplate, Expr, Step, PRIMARY_STEPS};
