use plotlink_frame::Axis;
use tracing::trace;

use crate::error::Result;
use crate::overrides::ParamOverride;
use crate::program::Program;
use crate::template::AxisTemplate;

/// Builds one [`Program`] per animation tick.
///
/// Building is two passes: evaluate both axis templates at the counter,
/// then apply the overrides in order.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    a: AxisTemplate,
    b: AxisTemplate,
    overrides: Vec<ParamOverride>,
}

impl ProgramBuilder {
    pub fn new(a: AxisTemplate, b: AxisTemplate) -> Self {
        Self {
            a,
            b,
            overrides: Vec::new(),
        }
    }

    /// The 16-step primary program with its `param-c` override.
    pub fn primary() -> Self {
        Self::new(AxisTemplate::primary_a(), AxisTemplate::primary_b())
            .with_override(ParamOverride::primary())
    }

    pub fn with_override(mut self, o: ParamOverride) -> Self {
        self.overrides.push(o);
        self
    }

    pub fn overrides(&self) -> &[ParamOverride] {
        &self.overrides
    }

    /// Evaluate the templates only.
    pub fn generate(&self, counter: u8) -> Result<Program> {
        Program::new(self.a.evaluate(counter)?, self.b.evaluate(counter)?)
    }

    /// Generate, then run every override.
    pub fn build(&self, counter: u8) -> Result<Program> {
        let mut program = self.generate(counter)?;
        for o in &self.overrides {
            o.apply(&mut program)?;
        }
        program.validate()?;
        trace!(counter, steps = program.axis(Axis::A).len(), "program built");
        Ok(program)
    }
}
