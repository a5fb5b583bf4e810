//! Incremental Bresenham line
//!
//! The line is normalized so the major axis is always iterated: when the
//! vertical extent is larger, x and y are exchanged for the whole job and
//! exchanged back only when a point is handed to the motion primitive.

use crate::motion::PlotterState;
use plotkit_core::{JobState, LogicalPosition, MotionStatus, PlotterHal};

/// Line drawing state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineJob {
    start: LogicalPosition,
    end: LogicalPosition,
    p1: i32,
    p2: i32,
    p: i32,
    cursor: LogicalPosition,
    minor_step: i32,
    swapped: bool,
    left_right: bool,
    state: JobState,
}

impl LineJob {
    /// Set up a line from `start` to `end` given the current head position
    ///
    /// Starts directly in `Cutting` when the head already sits on `start`.
    pub fn new(head: LogicalPosition, start: LogicalPosition, end: LogicalPosition) -> Self {
        let state = if head == start {
            JobState::Cutting
        } else {
            JobState::Moving
        };

        let (mut start, mut end) = (start, end);
        let mut swapped = false;
        let (mut dx, mut dy, mut left_right) = extents(start, end);
        if dx < dy {
            start = start.swapped();
            end = end.swapped();
            (dx, dy, left_right) = extents(start, end);
            swapped = true;
        }

        let p1 = 2 * dy;
        Self {
            start,
            end,
            p1,
            p2: p1 - 2 * dx,
            p: 2 * dy - dx,
            cursor: start,
            minor_step: if end.y >= start.y { 1 } else { -1 },
            swapped,
            left_right,
            state,
        }
    }

    /// Current phase
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Whether x and y were exchanged to iterate the major axis
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Start point in plotter coordinates
    pub fn start(&self) -> LogicalPosition {
        self.unswap(self.start)
    }

    /// End point in plotter coordinates
    pub fn end(&self) -> LogicalPosition {
        self.unswap(self.end)
    }

    fn unswap(&self, point: LogicalPosition) -> LogicalPosition {
        if self.swapped {
            point.swapped()
        } else {
            point
        }
    }

    /// Advance by one motion primitive call
    pub fn step<H: PlotterHal>(&mut self, plotter: &mut PlotterState, hal: &mut H) -> MotionStatus {
        match self.state {
            JobState::Moving => {
                let target = self.unswap(self.start);
                if plotter.move_toward(hal, target, false).is_finished() {
                    hal.emit("Cutting.");
                    tracing::debug!("Line reached start {}", target);
                    self.state = JobState::Cutting;
                }
                MotionStatus::InProgress
            }
            JobState::Cutting => {
                if self.cursor.x == self.end.x {
                    self.state = JobState::Finished;
                    return MotionStatus::Finished;
                }

                if self.p >= 0 {
                    self.p += self.p2;
                    self.cursor.y += self.minor_step;
                } else {
                    self.p += self.p1;
                }
                self.cursor.x += if self.left_right { 1 } else { -1 };

                let target = self.unswap(self.cursor);
                plotter.move_toward(hal, target, true);
                MotionStatus::InProgress
            }
            JobState::Finished => MotionStatus::Finished,
        }
    }
}

fn extents(start: LogicalPosition, end: LogicalPosition) -> (i32, i32, bool) {
    let left_right = end.x >= start.x;
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    (dx, dy, left_right)
}
