//! Unit conversion utilities
//!
//! Handles conversion between millimetres, the shared logical step grid, and
//! each axis's own motor steps.
//!
//! One logical unit equals the finer of the two axis pitches, so a single
//! logical step never needs more than one motor step on either axis. Every
//! conversion truncates toward zero; recorded step traces depend on it.

use crate::data::{Axis, LogicalPosition, RealPosition};
use crate::error::JobError;
use serde::{Deserialize, Serialize};

/// Default X motor travel per step in millimetres
pub const DEFAULT_X_PITCH_MM: f64 = 0.1;

/// Default Y motor travel per step in millimetres
pub const DEFAULT_Y_PITCH_MM: f64 = 0.12125;

/// Largest logical coordinate magnitude accepted for job geometry
///
/// Twice the distance between two accepted coordinates still fits in `i32`,
/// which the line error terms and circle extents rely on.
pub const MAX_LOGICAL_COORDINATE: i32 = i32::MAX / 4;

/// Accept a logical coordinate within `±MAX_LOGICAL_COORDINATE`
pub fn check_logical(value: i64) -> Result<i32, JobError> {
    i32::try_from(value)
        .ok()
        .filter(|v| (-MAX_LOGICAL_COORDINATE..=MAX_LOGICAL_COORDINATE).contains(v))
        .ok_or(JobError::CoordinateOutOfRange {
            value,
            max: MAX_LOGICAL_COORDINATE,
        })
}

/// Accept a point whose coordinates are both in range
pub fn check_position(point: LogicalPosition) -> Result<LogicalPosition, JobError> {
    check_logical(point.x.into())?;
    check_logical(point.y.into())?;
    Ok(point)
}

/// Convert millimetres to logical units, truncating toward zero
///
/// * `mm` - Length in millimetres
/// * `finest_pitch_mm` - The finer of the two axis pitches
pub fn mm_to_logical(mm: f64, finest_pitch_mm: f64) -> i32 {
    (mm / finest_pitch_mm) as i32
}

/// Convert logical units to motor steps of one axis, truncating toward zero
///
/// * `logical` - Position in logical units
/// * `finest_pitch_mm` - The finer of the two axis pitches
/// * `axis_pitch_mm` - Travel per motor step of the target axis
pub fn logical_to_real(logical: i32, finest_pitch_mm: f64, axis_pitch_mm: f64) -> i32 {
    (logical as f64 * finest_pitch_mm / axis_pitch_mm) as i32
}

/// Pitch pair of the two axes with the derived logical unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConverter {
    x_pitch_mm: f64,
    y_pitch_mm: f64,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            x_pitch_mm: DEFAULT_X_PITCH_MM,
            y_pitch_mm: DEFAULT_Y_PITCH_MM,
        }
    }
}

impl UnitConverter {
    /// Create a converter for the given per-step pitches
    ///
    /// Returns `None` unless both pitches are finite and positive.
    pub fn new(x_pitch_mm: f64, y_pitch_mm: f64) -> Option<Self> {
        let valid = |p: f64| p.is_finite() && p > 0.0;
        if valid(x_pitch_mm) && valid(y_pitch_mm) {
            Some(Self {
                x_pitch_mm,
                y_pitch_mm,
            })
        } else {
            None
        }
    }

    /// Travel per motor step of one axis
    pub fn pitch(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_pitch_mm,
            Axis::Y => self.y_pitch_mm,
        }
    }

    /// Size of one logical unit in millimetres
    pub fn finest_pitch(&self) -> f64 {
        self.x_pitch_mm.min(self.y_pitch_mm)
    }

    /// Millimetres to logical units
    pub fn mm_to_logical(&self, mm: f64) -> i32 {
        mm_to_logical(mm, self.finest_pitch())
    }

    /// Millimetres to logical units, rejecting values the geometry cannot hold
    pub fn checked_mm_to_logical(&self, mm: f64) -> Result<i32, JobError> {
        if !mm.is_finite() {
            return Err(JobError::NonFiniteCoordinate { value: mm });
        }
        let logical = (mm / self.finest_pitch()).trunc();
        if logical.abs() > f64::from(MAX_LOGICAL_COORDINATE) {
            return Err(JobError::CoordinateOutOfRange {
                value: logical as i64,
                max: MAX_LOGICAL_COORDINATE,
            });
        }
        Ok(self.mm_to_logical(mm))
    }

    /// Logical units back to millimetres (for display)
    pub fn logical_to_mm(&self, logical: i32) -> f64 {
        logical as f64 * self.finest_pitch()
    }

    /// Logical units to motor steps of `axis`
    pub fn logical_to_real(&self, logical: i32, axis: Axis) -> i32 {
        logical_to_real(logical, self.finest_pitch(), self.pitch(axis))
    }

    /// Motor step position matching a logical head position
    pub fn real_position(&self, logical: LogicalPosition) -> RealPosition {
        RealPosition::new(
            self.logical_to_real(logical.x, Axis::X),
            self.logical_to_real(logical.y, Axis::Y),
        )
    }
}
