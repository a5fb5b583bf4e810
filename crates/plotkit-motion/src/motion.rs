//! Head state and the single-step motion primitive
//!
//! All geometry runs on the logical grid. After every logical step the
//! position is rescaled to each axis's own motor pitch and a physical pulse
//! is issued only where the rescaled position changed, so the coarser axis
//! is never double-stepped.

use crate::limits::AxisLimitTracker;
use crate::pen::PenActuator;
use crate::stepper::StepperDriver;
use plotkit_core::{
    Axis, AxisArea, Direction, JobError, LimitSwitches, LogicalPosition, MotionStatus, MotorPort,
    PenState, PlotterHal, RealPosition, UnitConverter,
};

/// Outcome of one pulse request on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Pattern written to the coils
    Stepped(u8),
    /// Withheld because the axis sits past a limit in that direction
    Clamped,
}

/// Limit tracker and phase sequencer of one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisChannel {
    axis: Axis,
    tracker: AxisLimitTracker,
    driver: StepperDriver,
}

impl AxisChannel {
    /// Create the channel for `axis`
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            tracker: AxisLimitTracker::new(),
            driver: StepperDriver::new(axis),
        }
    }

    /// Current boundary area
    pub fn area(&self) -> AxisArea {
        self.tracker.area()
    }

    /// Phase sequencer state
    pub fn driver(&self) -> &StepperDriver {
        &self.driver
    }

    /// Read the switch, then issue one pulse unless the limit forbids it
    pub fn pulse<H>(&mut self, hal: &mut H, direction: Direction) -> StepOutcome
    where
        H: MotorPort + LimitSwitches,
    {
        let asserted = hal.is_at_limit(self.axis);
        let area = self.tracker.update(asserted, self.driver.last_direction());

        if self.tracker.clamps(direction) {
            self.driver.record_boundary_hit();
            tracing::trace!("{} axis clamped {} while {}", self.axis, direction, area);
            return StepOutcome::Clamped;
        }

        let pattern = self.driver.step(direction);
        hal.write_phase(self.axis, pattern);
        StepOutcome::Stepped(pattern)
    }
}

/// Mutable plotter state shared by every job
#[derive(Debug, Clone)]
pub struct PlotterState {
    units: UnitConverter,
    logical: LogicalPosition,
    real: RealPosition,
    x: AxisChannel,
    y: AxisChannel,
    pen: PenActuator,
}

impl PlotterState {
    /// Create a state with the head at the logical origin
    pub fn new(units: UnitConverter, pen_settle_ms: u32) -> Self {
        Self {
            units,
            logical: LogicalPosition::default(),
            real: RealPosition::default(),
            x: AxisChannel::new(Axis::X),
            y: AxisChannel::new(Axis::Y),
            pen: PenActuator::new(pen_settle_ms),
        }
    }

    /// Unit conversion in use
    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    /// Head position on the logical grid
    pub fn logical(&self) -> LogicalPosition {
        self.logical
    }

    /// Head position in motor steps actually issued
    pub fn real(&self) -> RealPosition {
        self.real
    }

    /// Boundary area of one axis
    pub fn area(&self, axis: Axis) -> AxisArea {
        self.channel(axis).area()
    }

    /// Whether both axes are inside the bed
    pub fn in_drawing_area(&self) -> bool {
        self.x.area() == AxisArea::In && self.y.area() == AxisArea::In
    }

    /// Whether at least one axis is inside the bed
    pub fn any_axis_in(&self) -> bool {
        self.x.area() == AxisArea::In || self.y.area() == AxisArea::In
    }

    /// Current pen state
    pub fn pen_state(&self) -> PenState {
        self.pen.state()
    }

    /// Steps withheld at a limit on one axis
    pub fn boundary_hits(&self, axis: Axis) -> u32 {
        self.channel(axis).driver().boundary_hits()
    }

    /// Limit tracker and sequencer of one axis
    pub fn channel(&self, axis: Axis) -> &AxisChannel {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn channel_mut(&mut self, axis: Axis) -> &mut AxisChannel {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Drive the pen output up and mark it up, without settling
    pub fn initialize_pen<H: PlotterHal>(&mut self, hal: &mut H) {
        self.pen.initialize(hal);
    }

    /// Raise the pen (with settle delay if it was down)
    pub fn pen_up<H: PlotterHal>(&mut self, hal: &mut H) -> bool {
        self.pen.set(hal, PenState::Up)
    }

    /// Move at most one logical unit per axis toward `target`
    ///
    /// The pen goes down only when `cutting` and both axes are inside the bed.
    /// Pulses refused at a limit are absorbed: the logical position still
    /// advances but the real position stays where the head physically is.
    pub fn move_toward<H: PlotterHal>(
        &mut self,
        hal: &mut H,
        target: LogicalPosition,
        cutting: bool,
    ) -> MotionStatus {
        self.logical.x += step_toward(self.logical.x, target.x);
        self.logical.y += step_toward(self.logical.y, target.y);

        let wanted = self.units.real_position(self.logical);

        let pen_down = cutting && self.in_drawing_area();
        self.pen.apply_intent(hal, pen_down);

        for axis in Axis::ALL {
            let Some(direction) = Direction::between(self.real.get(axis), wanted.get(axis)) else {
                continue;
            };
            if let StepOutcome::Stepped(_) = self.channel_mut(axis).pulse(hal, direction) {
                *self.real.get_mut(axis) += direction.phase_delta() as i32;
            }
        }

        if self.logical == target {
            MotionStatus::Finished
        } else {
            MotionStatus::InProgress
        }
    }

    /// De-energize both motors
    pub fn release_motors<H: MotorPort>(&mut self, hal: &mut H) {
        for axis in Axis::ALL {
            hal.write_phase(axis, 0);
        }
    }

    /// Find the bed origin using the limit switches
    ///
    /// Steps each axis backward until its switch trips, then forward until
    /// it clears, pacing every pulse by `step_delay_ms`. The head position
    /// is reset to the origin afterwards.
    pub fn home<H: PlotterHal>(
        &mut self,
        hal: &mut H,
        max_steps: u32,
        step_delay_ms: u32,
    ) -> Result<(), JobError> {
        self.pen.set(hal, PenState::Up);

        for axis in Axis::ALL {
            self.seek(hal, axis, Direction::Backward, AxisArea::Before, max_steps, step_delay_ms)?;
        }
        for axis in Axis::ALL {
            self.seek(hal, axis, Direction::Forward, AxisArea::In, max_steps, step_delay_ms)?;
        }

        self.logical = LogicalPosition::default();
        self.real = RealPosition::default();
        tracing::info!("Homing complete");
        Ok(())
    }

    fn seek<H: PlotterHal>(
        &mut self,
        hal: &mut H,
        axis: Axis,
        direction: Direction,
        goal: AxisArea,
        max_steps: u32,
        step_delay_ms: u32,
    ) -> Result<(), JobError> {
        let mut steps = 0;
        while self.area(axis) != goal {
            if steps >= max_steps {
                tracing::warn!("Homing {} {} gave up after {} steps", axis, direction, steps);
                return Err(JobError::HomingFailed { axis, max_steps });
            }
            self.channel_mut(axis).pulse(hal, direction);
            hal.delay_ms(step_delay_ms);
            steps += 1;
        }
        tracing::debug!("Homing {} reached {} after {} steps", axis, goal, steps);
        Ok(())
    }
}

fn step_toward(from: i32, to: i32) -> i32 {
    (to - from).signum()
}
