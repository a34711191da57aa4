//! Post-generation overrides.
//!
//! An override pins a range of one parameter sequence to a constant after the
//! template has been evaluated. It runs as its own pass and is idempotent.

use std::ops::Range;

use plotlink_frame::{Axis, Role};

use crate::error::{ProgramError, Result};
use crate::program::{AxisProgram, Program};
use crate::template::PRIMARY_STEPS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamOverride {
    /// Axis to rewrite, or both when `None`.
    pub axis: Option<Axis>,
    pub role: Role,
    pub range: Range<usize>,
    pub value: u8,
}

impl ParamOverride {
    pub fn new(axis: Option<Axis>, role: Role, range: Range<usize>, value: u8) -> Self {
        Self {
            axis,
            role,
            range,
            value,
        }
    }

    /// `param-c` of steps 3 through 15 held at 1 on both axes.
    pub fn primary() -> Self {
        Self::new(None, Role::ParamC, 3..PRIMARY_STEPS, 1)
    }

    /// Apply to every targeted axis of `program`.
    pub fn apply(&self, program: &mut Program) -> Result<()> {
        for axis in Axis::ALL {
            if self.axis.is_none_or(|target| target == axis) {
                self.apply_axis(program.axis_mut(axis))?;
            }
        }
        Ok(())
    }

    /// Apply to one axis, regardless of `self.axis`.
    pub fn apply_axis(&self, axis: &mut AxisProgram) -> Result<()> {
        let len = axis.len();
        if self.range.end > len {
            return Err(ProgramError::OverrideOutOfBounds {
                role: self.role,
                end: self.range.end,
                len,
            });
        }
        let values = axis.param_mut(self.role)?;
        if let Some(slice) = values.get_mut(self.range.clone()) {
            slice.fill(self.value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::AxisTemplate;

    fn primary_program(counter: u8) -> Program {
        Program::new(
            AxisTemplate::primary_a().evaluate(counter).unwrap(),
            AxisTemplate::primary_b().evaluate(counter).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn primary_override_pins_trailing_param_c() {
        let mut program = primary_program(100);
        ParamOverride::primary().apply(&mut program).unwrap();

        for axis in Axis::ALL {
            assert_eq!(program.axis(axis).block(Role::ParamC), &[1u8; 16]);
        }
        assert_eq!(
            program.axis(Axis::A).block(Role::ParamA)[4],
            100,
            "other sequences untouched"
        );
    }

    #[test]
    fn override_is_idempotent() {
        let mut once = primary_program(77);
        ParamOverride::primary().apply(&mut once).unwrap();

        let mut twice = once.clone();
        ParamOverride::primary().apply(&mut twice).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn single_axis_override() {
        let mut program = primary_program(50);
        let before_b = program.axis(Axis::B).clone();
        ParamOverride::new(Some(Axis::A), Role::ParamB, 0..2, 9)
            .apply(&mut program)
            .unwrap();

        assert_eq!(&program.axis(Axis::A).block(Role::ParamB)[..3], &[9, 9, 102]);
        assert_eq!(program.axis(Axis::B), &before_b);
    }

    #[test]
    fn out_of_bounds_range_rejected() {
        let mut program = primary_program(50);
        let err = ParamOverride::new(None, Role::ParamA, 10..20, 0)
            .apply(&mut program)
            .unwrap_err();
        assert!(matches!(
            err,
            ProgramError::OverrideOutOfBounds {
                role: Role::ParamA,
                end: 20,
                len: 16,
            }
        ));
    }

    #[test]
    fn instructions_cannot_be_overridden() {
        let mut program = primary_program(50);
        let err = ParamOverride::new(None, Role::Instructions, 0..1, 0)
            .apply(&mut program)
            .unwrap_err();
        assert!(matches!(err, ProgramError::NotAParameter(Role::Instructions)));
    }
}
