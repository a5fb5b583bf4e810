//! # PlotKit Motion
//!
//! Turns drawing requests into single motor pulses. Every job advances by at
//! most one logical unit per axis per tick so the control loop can keep
//! servicing the terminal between steps.
//!
//! ## Layers
//!
//! - [`stepper`], [`limits`], [`pen`]: one hardware surface each
//! - [`motion`]: the move-one-unit primitive and homing
//! - [`jobs`]: line, circle, demo and Hilbert state machines
//! - [`scheduler`]: the tick loop holding at most one plain and one complex job
//! - [`command`]: the terminal command language

pub mod command;
pub mod hilbert;
pub mod jobs;
pub mod limits;
pub mod motion;
pub mod pen;
pub mod scheduler;
pub mod stepper;

pub use command::Command;
pub use jobs::{CircleJob, ComplexJob, DemoJob, DemoOp, DemoStep, DrawingJob, HilbertJob, LineJob};
pub use limits::AxisLimitTracker;
pub use motion::{AxisChannel, PlotterState, StepOutcome};
pub use pen::{PenActuator, DEFAULT_PEN_SETTLE_MS};
pub use scheduler::{HilbertParams, Scheduler, SchedulerConfig, TickOutcome};
pub use stepper::StepperDriver;
