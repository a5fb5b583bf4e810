//! Hardware abstraction for the plotter
//!
//! One small trait per hardware surface: motor coil outputs, limit switch
//! inputs, the pen output, a blocking delay, and the status line sink.
//! Production builds implement them over port registers; tests and the
//! terminal binary use [`sim::SimulatedPlotter`].

pub mod sim;

use crate::data::Axis;

/// Number of entries in the motor phase table
pub const MOTOR_PHASE_COUNT: usize = 8;

/// Half-step coil patterns, one nibble per phase
pub const MOTOR_PHASES: [u8; MOTOR_PHASE_COUNT] = [0x1, 0x5, 0x4, 0x6, 0x2, 0xA, 0x8, 0x9];

/// Motor coil outputs
pub trait MotorPort {
    /// Drive a 4-bit coil pattern onto the axis; `0` de-energizes it
    fn write_phase(&mut self, axis: Axis, pattern: u8);
}

/// Limit switch inputs (one switch per axis, shared by both travel ends)
pub trait LimitSwitches {
    /// True while the axis switch reads "at limit"
    fn is_at_limit(&mut self, axis: Axis) -> bool;
}

/// Pen actuator output
pub trait PenPort {
    /// Drive the pen output (`true` lowers the pen)
    fn set_pen(&mut self, down: bool);
}

/// Blocking millisecond wait
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Fire-and-forget diagnostic line sink
pub trait StatusSink {
    /// Emit one status line; failures are ignored by the caller
    fn emit(&mut self, line: &str);
}

/// Everything the scheduler needs from the board
pub trait PlotterHal: MotorPort + LimitSwitches + PenPort + Delay + StatusSink {}

impl<T> PlotterHal for T where T: MotorPort + LimitSwitches + PenPort + Delay + StatusSink {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_table_changes_one_coil_per_step() {
        for i in 0..MOTOR_PHASE_COUNT {
            let a = MOTOR_PHASES[i];
            let b = MOTOR_PHASES[(i + 1) % MOTOR_PHASE_COUNT];
            assert_eq!((a ^ b).count_ones(), 1, "phases {} and {}", i, i + 1);
            assert!(a <= 0x0F);
        }
    }
}
