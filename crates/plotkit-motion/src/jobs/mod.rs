//! Drawing jobs
//!
//! Plain jobs (line, circle) drive the head one motion primitive at a time.
//! Complex jobs (demo, Hilbert) produce a sequence of plain jobs.

pub mod circle;
pub mod demo;
pub mod hilbert;
pub mod line;

pub use circle::CircleJob;
pub use demo::{DemoJob, DemoOp, DemoStep};
pub use hilbert::HilbertJob;
pub use line::LineJob;

use crate::motion::PlotterState;
use plotkit_core::{JobState, MotionStatus, PlotterHal};

/// Slot for the single active plain job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DrawingJob {
    #[default]
    Idle,
    Line(LineJob),
    Circle(CircleJob),
}

impl DrawingJob {
    /// Whether a line or circle is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, DrawingJob::Idle)
    }

    /// Phase of the active job
    pub fn state(&self) -> Option<JobState> {
        match self {
            DrawingJob::Idle => None,
            DrawingJob::Line(job) => Some(job.state()),
            DrawingJob::Circle(job) => Some(job.state()),
        }
    }

    /// Advance the active job once; an empty slot reports `Finished`
    pub fn step<H: PlotterHal>(&mut self, plotter: &mut PlotterState, hal: &mut H) -> MotionStatus {
        match self {
            DrawingJob::Idle => MotionStatus::Finished,
            DrawingJob::Line(job) => job.step(plotter, hal),
            DrawingJob::Circle(job) => job.step(plotter, hal),
        }
    }
}

/// Slot for the single active complex job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComplexJob {
    #[default]
    Idle,
    Demo(DemoJob),
    Hilbert(HilbertJob),
}

impl ComplexJob {
    /// Whether a demo or Hilbert curve is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, ComplexJob::Idle)
    }
}
