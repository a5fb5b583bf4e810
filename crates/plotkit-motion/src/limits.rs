//! Per-axis boundary tracking
//!
//! Each axis has a single limit switch shared by both ends of travel. Which
//! end was hit is inferred from the direction the axis was last stepped in
//! when the switch first read "at limit".

use plotkit_core::{AxisArea, Direction};

/// Boundary-area state machine for one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisLimitTracker {
    area: AxisArea,
}

impl AxisLimitTracker {
    /// Create a tracker that assumes the head starts inside the bed
    pub fn new() -> Self {
        Self::default()
    }

    /// Current area
    pub fn area(&self) -> AxisArea {
        self.area
    }

    /// Feed one switch reading and the last commanded direction
    ///
    /// An asserted switch moves `In` to `Before` (last moved backward) or
    /// `After` (last moved forward) and holds an existing `Before`/`After`.
    /// A clear switch always returns the axis to `In`.
    pub fn update(&mut self, switch_asserted: bool, last_direction: Direction) -> AxisArea {
        if switch_asserted {
            if self.area == AxisArea::In {
                self.area = match last_direction {
                    Direction::Backward => AxisArea::Before,
                    Direction::Forward => AxisArea::After,
                };
            }
        } else {
            self.area = AxisArea::In;
        }
        self.area
    }

    /// Whether a step in `direction` must be withheld
    pub fn clamps(&self, direction: Direction) -> bool {
        self.area.clamps(direction)
    }
}
