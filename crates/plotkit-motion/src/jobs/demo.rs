//! Demo script replay
//!
//! A script is a flat list of integers: an opcode followed by its arguments,
//! all coordinates in logical units. `END`, an unknown opcode or a truncated
//! argument list terminates the script.

use super::circle::CircleJob;
use super::line::LineJob;
use plotkit_core::{check_position, JobError, LogicalPosition};

/// Terminates the script
pub const OP_END: i32 = 0;
/// `x1 y1 x2 y2`
pub const OP_LINE: i32 = 1;
/// `cx cy r`
pub const OP_CIRCLE: i32 = 2;
/// `x y`, from the current head position
pub const OP_CUT: i32 = 3;

/// Framed figure drawn by `DEMO`
#[rustfmt::skip]
pub const BUILTIN_SCRIPT: &[i32] = &[
    OP_LINE, 200, 200, 1200, 200,
    OP_CUT, 1200, 1000,
    OP_CUT, 200, 1000,
    OP_CUT, 200, 200,
    OP_CIRCLE, 700, 600, 300,
    OP_CIRCLE, 700, 600, 150,
    OP_LINE, 400, 600, 1000, 600,
    OP_LINE, 700, 300, 700, 900,
    OP_LINE, 200, 1000, 1200, 200,
    OP_END,
];

/// One decoded script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOp {
    Line {
        start: LogicalPosition,
        end: LogicalPosition,
    },
    Circle {
        center: LogicalPosition,
        radius: i32,
    },
    Cut {
        end: LogicalPosition,
    },
    End,
}

impl DemoOp {
    /// Decode the instruction at `cursor`, returning it and the cursor past it
    pub fn decode(script: &[i32], cursor: usize) -> (Self, usize) {
        let Some(&opcode) = script.get(cursor) else {
            return (DemoOp::End, cursor);
        };
        let argc = match opcode {
            OP_LINE => 4,
            OP_CIRCLE => 3,
            OP_CUT => 2,
            _ => return (DemoOp::End, cursor),
        };
        let next = cursor + 1 + argc;
        let Some(args) = script.get(cursor + 1..next) else {
            tracing::warn!("Demo script truncated at index {}", cursor);
            return (DemoOp::End, cursor);
        };

        let op = match *args {
            [x1, y1, x2, y2] => DemoOp::Line {
                start: LogicalPosition::new(x1, y1),
                end: LogicalPosition::new(x2, y2),
            },
            [cx, cy, radius] => DemoOp::Circle {
                center: LogicalPosition::new(cx, cy),
                radius,
            },
            [x, y] => DemoOp::Cut {
                end: LogicalPosition::new(x, y),
            },
            _ => DemoOp::End,
        };
        (op, next)
    }
}

/// What the demo wants drawn next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoStep {
    Line(LineJob),
    Circle(CircleJob),
    End,
}

/// Demo script driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoJob {
    script: &'static [i32],
    cursor: usize,
}

impl DemoJob {
    /// Replay `script` from the beginning
    pub fn new(script: &'static [i32]) -> Self {
        Self { script, cursor: 0 }
    }

    /// Replay the built-in figure
    pub fn builtin() -> Self {
        Self::new(BUILTIN_SCRIPT)
    }

    /// Index of the next opcode
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Decode the next instruction into a drawing job
    ///
    /// A circle the reconstruction cannot draw, or a point outside the
    /// accepted coordinate range, is reported as an error; the cursor has
    /// already moved past it.
    pub fn advance(&mut self, head: LogicalPosition) -> Result<DemoStep, JobError> {
        let (op, next) = DemoOp::decode(self.script, self.cursor);
        self.cursor = next;

        Ok(match op {
            DemoOp::Line { start, end } => {
                DemoStep::Line(LineJob::new(head, check_position(start)?, check_position(end)?))
            }
            DemoOp::Cut { end } => DemoStep::Line(LineJob::new(head, head, check_position(end)?)),
            DemoOp::Circle { center, radius } => DemoStep::Circle(CircleJob::new(center, radius)?),
            DemoOp::End => DemoStep::End,
        })
    }
}

impl Default for DemoJob {
    fn default() -> Self {
        Self::builtin()
    }
}
