//! Cooperative control loop
//!
//! One plain job (line or circle) and one complex job (demo or Hilbert) can
//! be held at a time. Each tick advances the plain job if there is one,
//! otherwise lets the complex job issue its next plain job, otherwise counts
//! toward idle power-save.

use crate::command::Command;
use crate::jobs::{CircleJob, ComplexJob, DemoJob, DemoStep, DrawingJob, HilbertJob, LineJob};
use crate::motion::PlotterState;
use crate::pen::DEFAULT_PEN_SETTLE_MS;
use plotkit_core::{
    check_position, Error, JobError, LogicalPosition, PlotterHal, Result, UnitConverter,
};
use serde::{Deserialize, Serialize};

/// Hilbert image placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HilbertParams {
    /// Edge length of the square image
    pub image_size_mm: f64,
    /// Lower-left corner, X
    pub origin_x_mm: f64,
    /// Lower-left corner, Y
    pub origin_y_mm: f64,
}

impl Default for HilbertParams {
    fn default() -> Self {
        Self {
            image_size_mm: 150.0,
            origin_x_mm: 20.0,
            origin_y_mm: 20.0,
        }
    }
}

/// Runtime parameters of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub units: UnitConverter,
    /// Pause after each tick while the head is inside the bed
    pub tick_ms: u32,
    /// Inactivity before the motors are released
    pub idle_time_ms: u32,
    pub pen_settle_ms: u32,
    /// Step budget for each homing phase
    pub homing_max_steps: u32,
    pub hilbert: HilbertParams,
}

impl SchedulerConfig {
    /// Idle ticks counted before power-save
    pub fn idle_threshold(&self) -> u32 {
        self.idle_time_ms.checked_div(self.tick_ms).unwrap_or(0)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            units: UnitConverter::default(),
            tick_ms: 4,
            idle_time_ms: 2000,
            pen_settle_ms: DEFAULT_PEN_SETTLE_MS,
            homing_max_steps: 100_000,
            hilbert: HilbertParams::default(),
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The plain job advanced
    Stepped,
    /// The plain job completed this tick
    JobFinished,
    /// The complex job issued its next instruction
    ComplexAdvanced,
    /// The complex job ran out of instructions
    ComplexFinished,
    /// Nothing to do
    Idle,
    /// Motors released and pen lifted
    PowerSave,
}

/// Tick-driven job scheduler over a hardware implementation
#[derive(Debug)]
pub struct Scheduler<H: PlotterHal> {
    hal: H,
    config: SchedulerConfig,
    plotter: PlotterState,
    drawing: DrawingJob,
    complex: ComplexJob,
    idle_ticks: u32,
    power_saving: bool,
}

impl<H: PlotterHal> Scheduler<H> {
    /// Take ownership of the hardware and drive the pen up
    pub fn new(mut hal: H, config: SchedulerConfig) -> Self {
        let mut plotter = PlotterState::new(config.units, config.pen_settle_ms);
        plotter.initialize_pen(&mut hal);
        Self {
            hal,
            config,
            plotter,
            drawing: DrawingJob::Idle,
            complex: ComplexJob::Idle,
            idle_ticks: 0,
            power_saving: false,
        }
    }

    /// Find the bed origin with the limit switches
    pub fn home(&mut self) -> std::result::Result<(), JobError> {
        tracing::info!("Homing");
        self.plotter
            .home(&mut self.hal, self.config.homing_max_steps, self.config.tick_ms)
            .inspect_err(|err| self.hal.emit(&format!("Error: {}", err)))
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Head, limit and pen state
    pub fn plotter(&self) -> &PlotterState {
        &self.plotter
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Whether any job slot is occupied
    pub fn is_busy(&self) -> bool {
        self.drawing.is_active() || self.complex.is_active()
    }

    pub fn drawing_job(&self) -> &DrawingJob {
        &self.drawing
    }

    pub fn complex_job(&self) -> &ComplexJob {
        &self.complex
    }

    /// Whether idle power-save has released the motors
    pub fn is_power_saving(&self) -> bool {
        self.power_saving
    }

    /// Idle ticks counted so far
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// Draw a line between two points given in millimetres
    pub fn start_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ensure_idle()?;
        let start = self.point_from_mm(x1, y1)?;
        let end = self.point_from_mm(x2, y2)?;

        self.hal.emit("Drawing started.");
        tracing::info!("Line from {} to {}", start, end);
        self.begin_line_logical(start, end).map_err(|err| self.reject(err))
    }

    /// Draw a circle given in millimetres
    pub fn start_circle(&mut self, cx: f64, cy: f64, r: f64) -> Result<()> {
        self.ensure_idle()?;
        let center = self.point_from_mm(cx, cy)?;
        let radius = self.mm_to_logical(r)?;
        let job = CircleJob::new(center, radius).map_err(|err| self.reject(err))?;

        self.hal.emit("Drawing started.");
        tracing::info!("Circle at {} with radius {}", center, radius);
        self.install(DrawingJob::Circle(job));
        Ok(())
    }

    /// Draw a line from the current head position to a point in millimetres
    pub fn start_cut(&mut self, x: f64, y: f64) -> Result<()> {
        self.ensure_idle()?;
        let end = self.point_from_mm(x, y)?;
        let head = self.plotter.logical();

        self.hal.emit("Drawing started.");
        tracing::info!("Cut from {} to {}", head, end);
        self.begin_line_logical(head, end).map_err(|err| self.reject(err))
    }

    /// Replay the built-in demo figure
    pub fn start_demo(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.drawing = DrawingJob::Idle;
        self.complex = ComplexJob::Demo(DemoJob::builtin());
        self.hal.emit("Drawing started.");
        tracing::info!("Demo started");
        Ok(())
    }

    /// Trace a Hilbert curve of recursion depth `depth`
    ///
    /// The head first travels pen-up to the image origin.
    pub fn start_hilbert(&mut self, depth: i32) -> Result<()> {
        self.ensure_idle()?;
        let params = self.config.hilbert;
        let origin = self.point_from_mm(params.origin_x_mm, params.origin_y_mm)?;
        let job = HilbertJob::new(depth, params.image_size_mm, origin, &self.config.units)
            .map_err(|err| self.reject(err))?;

        tracing::info!(
            "Hilbert depth {}: {} points, {} units per cell, {:.1} mm square",
            job.depth(),
            job.length(),
            job.steps_per_line(),
            job.image_size_mm(&self.config.units)
        );
        self.drawing = DrawingJob::Idle;
        self.complex = ComplexJob::Hilbert(job);
        self.hal.emit("Drawing started.");
        self.begin_line_logical(origin, origin).map_err(|err| self.reject(err))
    }

    /// Abandon every job; the head stays where it is
    pub fn stop_all(&mut self) {
        if self.is_busy() {
            tracing::info!("Stopping active jobs");
        }
        self.drawing = DrawingJob::Idle;
        self.complex = ComplexJob::Idle;
        self.hal.emit("Stopped.");
    }

    /// Dispatch a parsed terminal command
    pub fn execute(&mut self, command: &Command) -> Result<()> {
        tracing::debug!("Executing {}", command);
        match *command {
            Command::Line { x1, y1, x2, y2 } => {
                self.start_line(x1.into(), y1.into(), x2.into(), y2.into())
            }
            Command::Circle { cx, cy, r } => self.start_circle(cx.into(), cy.into(), r.into()),
            Command::Cut { x, y } => self.start_cut(x.into(), y.into()),
            Command::Demo => self.start_demo(),
            Command::Hilbert { depth } => self.start_hilbert(depth),
            Command::Stop => {
                self.stop_all();
                Ok(())
            }
        }
    }

    /// Replace the plain job with a line in logical units
    ///
    /// Skips the busy check; complex jobs use this to issue their lines.
    pub fn begin_line_logical(
        &mut self,
        start: LogicalPosition,
        end: LogicalPosition,
    ) -> std::result::Result<(), JobError> {
        let job = LineJob::new(
            self.plotter.logical(),
            check_position(start)?,
            check_position(end)?,
        );
        self.install(DrawingJob::Line(job));
        Ok(())
    }

    /// Replace the plain job with a circle in logical units
    pub fn begin_circle_logical(
        &mut self,
        center: LogicalPosition,
        radius: i32,
    ) -> std::result::Result<(), JobError> {
        let job = CircleJob::new(center, radius)?;
        self.install(DrawingJob::Circle(job));
        Ok(())
    }

    /// Run one iteration of the control loop
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = if self.drawing.is_active() {
            self.step_drawing()
        } else if self.complex.is_active() {
            self.drive_complex()
        } else {
            self.idle_tick()
        };

        if self.plotter.any_axis_in() {
            self.hal.delay_ms(self.config.tick_ms);
        }
        outcome
    }

    /// Tick until no job is active; returns the ticks taken, or `None` if
    /// still busy after `max_ticks`
    pub fn run_until_idle(&mut self, max_ticks: usize) -> Option<usize> {
        for ticks in 0..max_ticks {
            if !self.is_busy() {
                return Some(ticks);
            }
            self.tick();
        }
        (!self.is_busy()).then_some(max_ticks)
    }

    fn step_drawing(&mut self) -> TickOutcome {
        if !self
            .drawing
            .step(&mut self.plotter, &mut self.hal)
            .is_finished()
        {
            return TickOutcome::Stepped;
        }

        self.drawing = DrawingJob::Idle;
        self.idle_ticks = 0;
        self.power_saving = false;
        self.hal.emit("Drawing finished.");
        tracing::debug!("Plain job finished at {}", self.plotter.logical());
        TickOutcome::JobFinished
    }

    fn drive_complex(&mut self) -> TickOutcome {
        let head = self.plotter.logical();
        let next = match &mut self.complex {
            ComplexJob::Idle => return TickOutcome::Idle,
            ComplexJob::Demo(job) => {
                self.hal.emit("Drawing demo.");
                job.advance(head).map(|step| match step {
                    DemoStep::Line(line) => Some(DrawingJob::Line(line)),
                    DemoStep::Circle(circle) => Some(DrawingJob::Circle(circle)),
                    DemoStep::End => None,
                })
            }
            ComplexJob::Hilbert(job) => {
                self.hal.emit("Drawing Hilbert.");
                Ok(job.advance(head).map(DrawingJob::Line))
            }
        };

        match next {
            Ok(Some(job)) => {
                self.install(job);
                TickOutcome::ComplexAdvanced
            }
            Ok(None) => {
                self.drawing = DrawingJob::Idle;
                self.complex = ComplexJob::Idle;
                tracing::info!("Complex drawing finished");
                TickOutcome::ComplexFinished
            }
            Err(err) => {
                // skip the instruction, keep replaying
                self.reject(err);
                TickOutcome::ComplexAdvanced
            }
        }
    }

    fn idle_tick(&mut self) -> TickOutcome {
        if self.idle_ticks < self.config.idle_threshold() {
            self.idle_ticks += 1;
            return TickOutcome::Idle;
        }
        if self.power_saving {
            return TickOutcome::Idle;
        }

        self.plotter.release_motors(&mut self.hal);
        self.hal.emit("Entering idle mode.");
        self.plotter.pen_up(&mut self.hal);
        self.power_saving = true;
        tracing::info!("Idle for {} ticks, motors released", self.idle_ticks);
        TickOutcome::PowerSave
    }

    fn install(&mut self, job: DrawingJob) {
        self.drawing = job;
        self.hal.emit("Moving into starting position.");
    }

    fn ensure_idle(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(self.reject(JobError::Busy));
        }
        Ok(())
    }

    fn reject(&mut self, err: JobError) -> Error {
        tracing::warn!("Rejected: {}", err);
        self.hal.emit(&format!("Error: {}", err));
        Error::Job(err)
    }

    fn mm_to_logical(&mut self, mm: f64) -> Result<i32> {
        self.config
            .units
            .checked_mm_to_logical(mm)
            .map_err(|err| self.reject(err))
    }

    fn point_from_mm(&mut self, x: f64, y: f64) -> Result<LogicalPosition> {
        Ok(LogicalPosition::new(
            self.mm_to_logical(x)?,
            self.mm_to_logical(y)?,
        ))
    }
}
