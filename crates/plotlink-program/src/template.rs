//! Program templates.
//!
//! A template fixes the opcode of every step and describes each parameter as
//! an expression of the animation counter. Evaluating a template at a counter
//! value yields one axis of a frame.

use plotlink_frame::{Axis, Role};

use crate::error::{ProgramError, Result};
use crate::opcode::Opcode;
use crate::program::AxisProgram;

/// Steps per axis in the primary template.
pub const PRIMARY_STEPS: usize = 16;

/// A parameter as a function of the counter `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expr {
    /// Fixed value.
    Const(i32),
    /// `i`
    Counter,
    /// `k + i`
    Offset(i32),
    /// `k + i / 4`
    QuarterOffset(i32),
    /// `k - i`
    Mirror(i32),
}

impl Expr {
    pub fn eval(self, counter: i32) -> i32 {
        match self {
            Expr::Const(k) => k,
            Expr::Counter => counter,
            Expr::Offset(k) => k + counter,
            Expr::QuarterOffset(k) => k + counter / 4,
            Expr::Mirror(k) => k - counter,
        }
    }
}

/// One instruction and its three parameter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub op: Opcode,
    pub a: Expr,
    pub b: Expr,
    pub c: Expr,
}

impl Step {
    pub const fn new(op: Opcode, a: Expr, b: Expr, c: Expr) -> Self {
        Self { op, a, b, c }
    }
}

/// The opcode layout and parameter expressions for one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTemplate {
    pub axis: Axis,
    pub steps: Vec<Step>,
}

impl AxisTemplate {
    pub fn new(axis: Axis, steps: Vec<Step>) -> Self {
        Self { axis, steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Evaluate every expression at `counter`.
    ///
    /// A value outside one byte is rejected, never truncated.
    pub fn evaluate(&self, counter: u8) -> Result<AxisProgram> {
        let i = i32::from(counter);
        let ops: Vec<Opcode> = self.steps.iter().map(|s| s.op).collect();
        let param_a = self.column(Role::ParamA, i, |s| s.a)?;
        let param_b = self.column(Role::ParamB, i, |s| s.b)?;
        let param_c = self.column(Role::ParamC, i, |s| s.c)?;
        AxisProgram::new(self.axis, &ops, param_a, param_b, param_c)
    }

    fn column(&self, role: Role, counter: i32, expr: fn(&Step) -> Expr) -> Result<Vec<u8>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let value = expr(step).eval(counter);
                u8::try_from(value).map_err(|_| ProgramError::ValueOutOfRange {
                    axis: self.axis,
                    role,
                    index,
                    value,
                })
            })
            .collect()
    }

    /// Primary 16-step layout for axis A.
    pub fn primary_a() -> Self {
        Self::new(Axis::A, PRIMARY_A.to_vec())
    }

    /// Primary 16-step layout for axis B.
    pub fn primary_b() -> Self {
        Self::new(Axis::B, PRIMARY_B.to_vec())
    }
}

// Short aliases for the step tables.
use Expr::{Const as K, Counter as I, Mirror, Offset, QuarterOffset as Quarter};
use Opcode::{Jump, Line, LineDashed, RectA, RectB};

const PRIMARY_A: [Step; PRIMARY_STEPS] = [
    Step::new(Line, K(100), K(100), K(1)),
    Step::new(Line, K(80), K(120), K(1)),
    Step::new(LineDashed, K(120), Quarter(90), K(1)),
    Step::new(Jump, K(39), K(90), K(90)),
    Step::new(RectA, I, I, I),
    Step::new(Jump, K(30), K(30), K(30)),
    Step::new(RectA, Mirror(130), K(130), K(130)),
    Step::new(Line, K(20), K(200), K(1)),
    Step::new(Line, K(30), K(50), K(1)),
    Step::new(Jump, K(100), K(100), K(100)),
    Step::new(RectA, Quarter(40), Quarter(40), Quarter(40)),
    Step::new(Jump, K(39), K(90), K(90)),
    Step::new(RectA, Offset(5), Offset(5), Offset(5)),
    Step::new(Jump, K(30), K(30), K(30)),
    Step::new(RectA, Mirror(130), K(130), K(130)),
    Step::new(Line, K(20), K(200), K(1)),
];

const PRIMARY_B: [Step; PRIMARY_STEPS] = [
    Step::new(LineDashed, K(200), K(100), K(1)),
    Step::new(Line, K(30), K(120), K(1)),
    Step::new(Line, K(20), Quarter(90), K(1)),
    Step::new(Jump, K(50), K(90), K(90)),
    Step::new(RectB, I, I, I),
    Step::new(Jump, K(30), K(30), K(30)),
    Step::new(RectB, Mirror(130), K(130), K(130)),
    Step::new(Line, K(20), K(200), K(1)),
    Step::new(Line, K(20), K(50), K(1)),
    Step::new(Jump, K(93), K(93), K(100)),
    Step::new(RectB, Quarter(40), Quarter(40), Quarter(40)),
    Step::new(Jump, K(50), K(90), K(90)),
    Step::new(RectB, Offset(5), Offset(5), Offset(5)),
    Step::new(Jump, K(30), K(30), K(30)),
    Step::new(RectB, Mirror(130), K(130), K(130)),
    Step::new(Line, K(20), K(200), K(1)),
];
