//! Data models for head position, axis state, and job progress
//!
//! This module provides:
//! - Axis and direction identifiers
//! - Logical (shared grid) and real (per-axis motor step) head positions
//! - Per-axis boundary area classification
//! - Pen state
//! - Motion and job progress states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plotter axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

impl Axis {
    /// Both axes in stepping order
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Index usable for per-axis arrays
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Commanded motor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing step counts
    Forward,
    /// Towards decreasing step counts
    Backward,
}

impl Direction {
    /// Phase table increment for this direction
    pub fn phase_delta(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Direction needed to go from `from` to `to`, if they differ
    pub fn between(from: i32, to: i32) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Forward),
            std::cmp::Ordering::Less => Some(Direction::Backward),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Position of the head on one axis relative to the drawing bed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisArea {
    /// Limit switch tripped while moving backward
    Before,
    /// Between both ends of travel
    #[default]
    In,
    /// Limit switch tripped while moving forward
    After,
}

impl AxisArea {
    /// Whether motion in `direction` would push further past the limit
    pub fn clamps(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (AxisArea::Before, Direction::Backward) | (AxisArea::After, Direction::Forward)
        )
    }
}

impl fmt::Display for AxisArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisArea::Before => write!(f, "before"),
            AxisArea::In => write!(f, "in"),
            AxisArea::After => write!(f, "after"),
        }
    }
}

/// Pen actuator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PenState {
    /// Lifted off the paper
    #[default]
    Up,
    /// Touching the paper
    Down,
}

impl PenState {
    /// Numeric form used in status lines (`Pen down = 1`)
    pub fn as_flag(self) -> u8 {
        match self {
            PenState::Up => 0,
            PenState::Down => 1,
        }
    }
}

/// Head position in the shared logical unit grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct LogicalPosition {
    /// X coordinate in logical units
    pub x: i32,
    /// Y coordinate in logical units
    pub y: i32,
}

impl LogicalPosition {
    /// Create a new logical position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate on the given axis
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// This position with `x` and `y` exchanged
    pub fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl fmt::Display for LogicalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for LogicalPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Head position in each axis's own motor step count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RealPosition {
    /// X motor steps
    pub x: i32,
    /// Y motor steps
    pub y: i32,
}

impl RealPosition {
    /// Create a new real position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step count on the given axis
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Mutable step count on the given axis
    pub fn get_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl fmt::Display for RealPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Result of a single motion or job step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStatus {
    /// More calls are needed
    InProgress,
    /// Target reached
    Finished,
}

impl MotionStatus {
    /// Check whether the operation is complete
    pub fn is_finished(self) -> bool {
        self == MotionStatus::Finished
    }
}

/// Phase of a simple drawing job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Pen-up travel to the start point
    Moving,
    /// Pen-down execution of the geometry
    Cutting,
    /// Geometry complete
    Finished,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Moving => write!(f, "moving"),
            JobState::Cutting => write!(f, "cutting"),
            JobState::Finished => write!(f, "finished"),
        }
    }
}
