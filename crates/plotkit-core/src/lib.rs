//! # PlotKit Core
//!
//! Core types, traits, and utilities for PlotKit.
//! Provides the shared data model for the two-axis plotter, the error
//! taxonomy, unit conversion between millimetres and motor steps, and the
//! hardware abstraction traits the motion layer drives.

pub mod data;
pub mod error;
pub mod hal;
pub mod types;
pub mod units;

pub use data::{
    Axis, AxisArea, Direction, JobState, LogicalPosition, MotionStatus, PenState, RealPosition,
};

pub use error::{CommandError, Error, JobError, Result};

pub use hal::{
    sim::{SimAxisSnapshot, SimulatedPlotter},
    Delay, LimitSwitches, MotorPort, PenPort, PlotterHal, StatusSink, MOTOR_PHASES,
    MOTOR_PHASE_COUNT,
};

// Re-export type aliases for convenience
pub use types::{thread_safe, ThreadSafe};

pub use units::{
    check_logical, check_position, logical_to_real, mm_to_logical, UnitConverter,
    DEFAULT_X_PITCH_MM, DEFAULT_Y_PITCH_MM, MAX_LOGICAL_COORDINATE,
};
