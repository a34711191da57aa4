use std::fmt;

/// Lowest counter value of the default swing.
pub const DEFAULT_LOWER_BOUND: u8 = 30;
/// Highest counter value of the default swing.
pub const DEFAULT_UPPER_BOUND: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increasing => f.write_str("increasing"),
            Direction::Decreasing => f.write_str("decreasing"),
        }
    }
}

/// Triangle-wave counter bouncing between two inclusive bounds.
///
/// Reaching a bound reverses direction before the step, so the counter
/// never leaves `[lower, upper]` once inside. A counter that starts outside
/// steps back toward the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oscillator {
    counter: u8,
    direction: Direction,
    lower: u8,
    upper: u8,
}

impl Oscillator {
    /// Callers must ensure `lower < upper`.
    pub fn new(start: u8, lower: u8, upper: u8) -> Self {
        Self {
            counter: start,
            direction: Direction::Increasing,
            lower,
            upper,
        }
    }

    /// Restore an explicit state, e.g. to resume an animation.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bounds(&self) -> (u8, u8) {
        (self.lower, self.upper)
    }

    /// Move one step and return the new counter.
    pub fn advance(&mut self) -> u8 {
        if self.counter >= self.upper {
            self.direction = Direction::Decreasing;
        } else if self.counter <= self.lower {
            self.direction = Direction::Increasing;
        }
        self.counter = match self.direction {
            Direction::Increasing => self.counter.saturating_add(1),
            Direction::Decreasing => self.counter.saturating_sub(1),
        };
        self.counter
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_BOUND, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND)
    }
}
