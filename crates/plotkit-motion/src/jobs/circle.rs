//! Incremental circle by octant reconstruction
//!
//! Each step grows (or shrinks) the octant offset `x` by one and rebuilds
//! the other offset from `round(sqrt(R² - x²))`. Mirroring through the
//! quadrant signs `i`, `j` and swapping the offsets when `i·j < 0` covers
//! all eight octants with one square root per step.
//!
//! Quadrants are visited `(1,1) → (1,-1) → (-1,-1) → (-1,1)`, clockwise from
//! the top of the circle.

use crate::motion::PlotterState;
use plotkit_core::{
    check_logical, check_position, JobError, JobState, LogicalPosition, MotionStatus, PlotterHal,
};

/// Smallest radius (in logical units) the reconstruction handles
pub const MIN_RADIUS: i32 = 2;

/// Circle drawing state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleJob {
    center: LogicalPosition,
    radius: i32,
    x: i32,
    i: i32,
    j: i32,
    x_grow: bool,
    state: JobState,
}

impl CircleJob {
    /// Set up a circle; the head first travels to the top point `(cx, cy + R)`
    ///
    /// The whole circle must lie within the accepted coordinate range.
    pub fn new(center: LogicalPosition, radius: i32) -> Result<Self, JobError> {
        if radius < MIN_RADIUS {
            return Err(JobError::InvalidRadius {
                radius,
                min: MIN_RADIUS,
            });
        }
        check_position(center)?;
        let r = i64::from(radius);
        for c in [i64::from(center.x), i64::from(center.y)] {
            check_logical(c - r)?;
            check_logical(c + r)?;
        }

        Ok(Self {
            center,
            radius,
            x: 0,
            i: 1,
            j: 1,
            x_grow: true,
            state: JobState::Moving,
        })
    }

    /// Current phase
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Circle center
    pub fn center(&self) -> LogicalPosition {
        self.center
    }

    /// Radius in logical units
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Quadrant signs `(i, j)` currently being traced
    pub fn quadrant(&self) -> (i32, i32) {
        (self.i, self.j)
    }

    /// Where the pen goes down and where the trace ends
    pub fn start_point(&self) -> LogicalPosition {
        LogicalPosition::new(self.center.x, self.center.y + self.radius)
    }

    fn offset_for(&self, x: i32) -> i32 {
        let r = i64::from(self.radius);
        let x = i64::from(x);
        round_half_up(babylonian_sqrt((r * r - x * x) as f64))
    }

    /// Advance by one motion primitive call
    pub fn step<H: PlotterHal>(&mut self, plotter: &mut PlotterState, hal: &mut H) -> MotionStatus {
        match self.state {
            JobState::Moving => {
                if plotter.move_toward(hal, self.start_point(), false).is_finished() {
                    hal.emit("Cutting.");
                    tracing::debug!("Circle reached start {}", self.start_point());
                    self.state = JobState::Cutting;
                }
                MotionStatus::InProgress
            }
            JobState::Cutting => {
                let same_sign = self.i * self.j > 0;
                let (dx, dy) = if self.x_grow {
                    self.x += 1;
                    let y_tmp = self.offset_for(self.x);
                    let offsets = if same_sign {
                        (self.x, y_tmp)
                    } else {
                        (y_tmp, self.x)
                    };
                    // crossing the diagonal: an exact tie keeps x, overshoot steps back
                    if self.x >= y_tmp {
                        self.x_grow = false;
                        if self.x > y_tmp {
                            self.x -= 1;
                        }
                    }
                    offsets
                } else {
                    self.x -= 1;
                    let y_tmp = self.offset_for(self.x);
                    let offsets = if same_sign {
                        (y_tmp, self.x)
                    } else {
                        (self.x, y_tmp)
                    };
                    if self.x == 0 {
                        self.x_grow = true;
                    }
                    offsets
                };

                let target = LogicalPosition::new(
                    self.center.x + dx * self.i,
                    self.center.y + dy * self.j,
                );
                plotter.move_toward(hal, target, true);

                if self.x == 0 {
                    match (self.i > 0, self.j > 0) {
                        (false, true) => {
                            self.state = JobState::Finished;
                            return MotionStatus::Finished;
                        }
                        (false, false) => self.j = 1,
                        (true, true) => self.j = -1,
                        (true, false) => self.i = -1,
                    }
                    tracing::trace!("Circle entering quadrant ({}, {})", self.i, self.j);
                }
                MotionStatus::InProgress
            }
            JobState::Finished => MotionStatus::Finished,
        }
    }
}

/// Round half up by truncating `a + 0.5` toward zero
pub fn round_half_up(a: f64) -> i32 {
    (a + 0.5) as i32
}

/// Square root by Babylonian iteration with a 0.1 stopping tolerance
///
/// Returns the last estimate before the step fell under the tolerance, which
/// is accurate to step granularity and deliberately no better.
pub fn babylonian_sqrt(x: f64) -> f64 {
    if nearly_equal(x, 0.0) {
        return 0.0;
    }
    if nearly_equal(x, 1.0) {
        return 1.0;
    }

    let mut next = 1.0;
    loop {
        let y = next;
        next = (y + x / y) * 0.5;
        if (next - y).abs() <= 0.1 {
            return y;
        }
    }
}

fn nearly_equal(x: f64, y: f64) -> bool {
    (x - y).abs() <= x.abs().min(y.abs()) * f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_core::MAX_LOGICAL_COORDINATE;

    #[test]
    fn test_sqrt_tolerance_behaviour() {
        assert_eq!(babylonian_sqrt(0.0), 0.0);
        assert_eq!(babylonian_sqrt(1.0), 1.0);
        // iterates 1 -> 2.5 -> 2.05 -> 2.0006, returns the estimate before the last
        assert!((babylonian_sqrt(4.0) - 2.05).abs() < 1e-12);
        assert!((babylonian_sqrt(3.0) - 1.75).abs() < 1e-12);
        for v in [2.0, 10.0, 99.0, 2500.0, 1_000_000.0] {
            assert!((babylonian_sqrt(v) - v.sqrt()).abs() < 0.2, "sqrt({})", v);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.75), 2);
        assert_eq!(round_half_up(1.49), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_rejects_degenerate_radius() {
        let center = LogicalPosition::default();
        assert_eq!(
            CircleJob::new(center, 1).unwrap_err(),
            JobError::InvalidRadius { radius: 1, min: 2 }
        );
        assert!(CircleJob::new(center, -4).is_err());
        assert!(CircleJob::new(center, 2).is_ok());
    }

    #[test]
    fn test_rejects_circle_leaving_coordinate_range() {
        let top = LogicalPosition::new(0, MAX_LOGICAL_COORDINATE - 5);
        assert!(matches!(
            CircleJob::new(top, 10),
            Err(JobError::CoordinateOutOfRange { .. })
        ));
        assert!(CircleJob::new(top, 5).is_ok());
        assert!(CircleJob::new(LogicalPosition::new(i32::MIN, 0), 10).is_err());
        assert!(CircleJob::new(LogicalPosition::default(), i32::MAX).is_err());
    }

    #[test]
    fn test_start_point_is_top_of_circle() {
        let job = CircleJob::new(LogicalPosition::new(10, 20), 5).unwrap();
        assert_eq!(job.start_point(), LogicalPosition::new(10, 25));
        assert_eq!(job.quadrant(), (1, 1));
        assert_eq!(job.state(), JobState::Moving);
    }
}
