//! Stepper phase sequencing
//!
//! Walks the half-step phase table one entry per step. The driver only
//! computes patterns; writing them to the port is the caller's job so that
//! a clamped step never advances the phase.

use plotkit_core::{Axis, Direction, MOTOR_PHASES, MOTOR_PHASE_COUNT};

/// Phase sequencer for one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperDriver {
    axis: Axis,
    phase: usize,
    last_direction: Direction,
    boundary_hits: u32,
}

impl StepperDriver {
    /// Create a driver at phase 0 with a backward last direction
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            phase: 0,
            last_direction: Direction::Backward,
            boundary_hits: 0,
        }
    }

    /// Axis driven by this sequencer
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Current index into the phase table
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Direction of the last step actually issued
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Number of steps withheld at a limit
    pub fn boundary_hits(&self) -> u32 {
        self.boundary_hits
    }

    /// Advance one phase in `direction` and return the coil pattern
    pub fn step(&mut self, direction: Direction) -> u8 {
        let delta = direction.phase_delta();
        self.phase = (self.phase as isize + delta).rem_euclid(MOTOR_PHASE_COUNT as isize) as usize;
        self.last_direction = direction;
        MOTOR_PHASES[self.phase]
    }

    /// Record a step that was withheld by the limit tracker
    pub fn record_boundary_hit(&mut self) {
        self.boundary_hits = self.boundary_hits.saturating_add(1);
    }
}
