//! Error handling for PlotKit
//!
//! Provides error types for every layer of the plotter core:
//! - Command errors (terminal input that could not be parsed)
//! - Job errors (start requests that were rejected before touching state)
//!
//! Hitting a limit switch is not an error; the motion layer absorbs it.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::Axis;
use thiserror::Error;

/// Command error type
///
/// Represents malformed terminal input. Raised before any state mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Empty input line
    #[error("Empty command")]
    Empty,

    /// Keyword not recognized
    #[error("Unknown command: {keyword}")]
    UnknownCommand {
        /// The unrecognized keyword.
        keyword: String,
    },

    /// More arguments than the command accepts
    #[error("Too many arguments for {command}: expected {expected}")]
    TooManyArguments {
        /// The command keyword.
        command: &'static str,
        /// The number of arguments the command takes.
        expected: usize,
    },

    /// Fewer arguments than the command needs
    #[error("Too few arguments for {command}: expected {expected}, got {found}")]
    TooFewArguments {
        /// The command keyword.
        command: &'static str,
        /// The number of arguments the command takes.
        expected: usize,
        /// The number of arguments supplied.
        found: usize,
    },

    /// Argument is not a base-10 integer
    #[error("Error at argument {position} of {command}: '{value}'")]
    InvalidArgument {
        /// The command keyword.
        command: &'static str,
        /// One-based argument position.
        position: usize,
        /// The offending text.
        value: String,
    },
}

/// Job error type
///
/// Represents a drawing request the core refused to start, or a setup step
/// that could not be satisfied. The control loop keeps running either way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    /// Another job is still active
    #[error("Device has not yet finished operation")]
    Busy,

    /// Coordinate is NaN or infinite
    #[error("Coordinate {value} mm is not a finite number")]
    NonFiniteCoordinate {
        /// The rejected coordinate in millimetres.
        value: f64,
    },

    /// Coordinate outside the range the geometry can represent
    #[error("Coordinate {value} is outside ±{max} logical units")]
    CoordinateOutOfRange {
        /// The rejected coordinate in logical units.
        value: i64,
        /// The largest accepted magnitude.
        max: i32,
    },

    /// Circle radius too small for octant reconstruction
    #[error("Invalid circle radius {radius} (minimum is {min} logical units)")]
    InvalidRadius {
        /// The requested radius in logical units.
        radius: i32,
        /// The smallest accepted radius in logical units.
        min: i32,
    },

    /// Negative Hilbert recursion depth
    #[error("Invalid recursion depth {depth}")]
    InvalidDepth {
        /// The requested depth.
        depth: i32,
    },

    /// Hilbert cell shorter than one logical unit
    #[error("Can't draw Hilbert's curve, the resolution is too large (depth {depth}, cell {cell_mm:.4} mm)")]
    ResolutionTooLarge {
        /// The requested depth.
        depth: i32,
        /// The cell edge length in millimetres.
        cell_mm: f64,
    },

    /// Homing never reached the limit switch
    #[error("Homing failed on axis {axis}: no limit change within {max_steps} steps")]
    HomingFailed {
        /// The axis that failed to home.
        axis: Axis,
        /// The step budget that was exhausted.
        max_steps: u32,
    },
}

/// Main error type for PlotKit
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Job error
    #[error(transparent)]
    Job(#[from] JobError),
}

impl Error {
    /// Check if this is an input parsing error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }

    /// Check if this is a rejected start
    pub fn is_job_error(&self) -> bool {
        matches!(self, Error::Job(_))
    }

    /// Check if the request was rejected because a job is active
    pub fn is_busy(&self) -> bool {
        matches!(self, Error::Job(JobError::Busy))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
