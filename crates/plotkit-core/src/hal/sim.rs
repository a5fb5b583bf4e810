//! In-memory plotter simulation
//!
//! Implements every HAL trait against a virtual bed. Each axis counts the
//! physical steps implied by the coil patterns it receives and asserts its
//! limit switch at either end of travel. Delays advance a virtual clock and
//! optionally sleep for real.

use super::{Delay, LimitSwitches, MotorPort, PenPort, StatusSink, MOTOR_PHASES, MOTOR_PHASE_COUNT};
use crate::data::Axis;
use std::time::Duration;

#[derive(Debug, Clone)]
struct SimAxis {
    position: i32,
    travel: i32,
    phase: usize,
    energized: bool,
    pulses: u64,
    rejected_patterns: u64,
}

impl SimAxis {
    fn new(travel: i32, start: i32) -> Self {
        Self {
            position: start,
            travel,
            phase: 0,
            energized: true,
            pulses: 0,
            rejected_patterns: 0,
        }
    }

    fn apply(&mut self, pattern: u8) {
        if pattern == 0 {
            self.energized = false;
            return;
        }
        self.energized = true;

        let Some(next) = MOTOR_PHASES.iter().position(|&p| p == pattern) else {
            self.rejected_patterns += 1;
            tracing::warn!("Simulator received invalid coil pattern {:#x}", pattern);
            return;
        };

        if next == (self.phase + 1) % MOTOR_PHASE_COUNT {
            self.position += 1;
            self.pulses += 1;
        } else if next == (self.phase + MOTOR_PHASE_COUNT - 1) % MOTOR_PHASE_COUNT {
            self.position -= 1;
            self.pulses += 1;
        } else if next != self.phase {
            // rotor cannot follow a skipped phase
            self.rejected_patterns += 1;
        }
        self.phase = next;
    }

    fn at_limit(&self) -> bool {
        self.position <= 0 || self.position >= self.travel
    }
}

/// Point-in-time view of one simulated axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimAxisSnapshot {
    /// Physical position in motor steps (switches at `0` and `travel`)
    pub position: i32,
    /// Index of the last energized phase
    pub phase: usize,
    /// Whether the coils are currently driven
    pub energized: bool,
    /// Total motor steps taken
    pub pulses: u64,
    /// Patterns the rotor could not follow
    pub rejected_patterns: u64,
}

/// Simulated two-axis plotter
#[derive(Debug, Clone)]
pub struct SimulatedPlotter {
    axes: [SimAxis; 2],
    pen_down: bool,
    pen_transitions: u32,
    elapsed_ms: u64,
    realtime: bool,
    status_lines: Vec<String>,
}

impl SimulatedPlotter {
    /// Create a bed with the given travel (in motor steps) and head start position
    pub fn new(x_travel: i32, y_travel: i32, start_x: i32, start_y: i32) -> Self {
        Self {
            axes: [
                SimAxis::new(x_travel, start_x),
                SimAxis::new(y_travel, start_y),
            ],
            pen_down: false,
            pen_transitions: 0,
            elapsed_ms: 0,
            realtime: false,
            status_lines: Vec::new(),
        }
    }

    /// Sleep for real on every delay
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Snapshot of one axis
    pub fn axis(&self, axis: Axis) -> SimAxisSnapshot {
        let a = &self.axes[axis.index()];
        SimAxisSnapshot {
            position: a.position,
            phase: a.phase,
            energized: a.energized,
            pulses: a.pulses,
            rejected_patterns: a.rejected_patterns,
        }
    }

    /// Physical head position in motor steps
    pub fn position(&self) -> (i32, i32) {
        (self.axes[0].position, self.axes[1].position)
    }

    /// Move the head by hand (coils are not involved)
    pub fn place_head(&mut self, axis: Axis, position: i32) {
        self.axes[axis.index()].position = position;
    }

    /// Whether the pen output is driven high, which lowers the pen
    pub fn pen_down(&self) -> bool {
        self.pen_down
    }

    /// Number of times the pen output changed level
    pub fn pen_transitions(&self) -> u32 {
        self.pen_transitions
    }

    /// Virtual time spent in delays
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Status lines emitted so far
    pub fn status_lines(&self) -> &[String] {
        &self.status_lines
    }

    /// Drain and return the recorded status lines
    pub fn take_status_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.status_lines)
    }
}

impl Default for SimulatedPlotter {
    fn default() -> Self {
        Self::new(3000, 2500, 1500, 1200)
    }
}

impl MotorPort for SimulatedPlotter {
    fn write_phase(&mut self, axis: Axis, pattern: u8) {
        self.axes[axis.index()].apply(pattern & 0x0F);
    }
}

impl LimitSwitches for SimulatedPlotter {
    fn is_at_limit(&mut self, axis: Axis) -> bool {
        self.axes[axis.index()].at_limit()
    }
}

impl PenPort for SimulatedPlotter {
    fn set_pen(&mut self, down: bool) {
        if self.pen_down != down {
            self.pen_transitions += 1;
        }
        self.pen_down = down;
    }
}

impl Delay for SimulatedPlotter {
    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
        if self.realtime {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}

impl StatusSink for SimulatedPlotter {
    fn emit(&mut self, line: &str) {
        tracing::info!(target: "plotkit::status", "{}", line);
        self.status_lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_backward_phase_moves_head() {
        let mut sim = SimulatedPlotter::new(100, 100, 50, 50);
        sim.write_phase(Axis::X, MOTOR_PHASES[1]);
        sim.write_phase(Axis::X, MOTOR_PHASES[2]);
        assert_eq!(sim.position(), (52, 50));

        sim.write_phase(Axis::X, MOTOR_PHASES[1]);
        assert_eq!(sim.position(), (51, 50));

        // wraps around the table
        sim.write_phase(Axis::Y, MOTOR_PHASES[7]);
        assert_eq!(sim.position(), (51, 49));
        assert_eq!(sim.axis(Axis::X).pulses, 3);
    }

    #[test]
    fn test_zero_pattern_releases_without_moving() {
        let mut sim = SimulatedPlotter::new(100, 100, 50, 50);
        sim.write_phase(Axis::Y, MOTOR_PHASES[1]);
        sim.write_phase(Axis::Y, 0);
        let y = sim.axis(Axis::Y);
        assert!(!y.energized);
        assert_eq!(y.position, 51);

        // resumes from the remembered phase
        sim.write_phase(Axis::Y, MOTOR_PHASES[2]);
        assert_eq!(sim.axis(Axis::Y).position, 52);
    }

    #[test]
    fn test_skipped_phase_is_rejected() {
        let mut sim = SimulatedPlotter::new(100, 100, 50, 50);
        sim.write_phase(Axis::X, MOTOR_PHASES[3]);
        let x = sim.axis(Axis::X);
        assert_eq!(x.position, 50);
        assert_eq!(x.rejected_patterns, 1);
    }

    #[test]
    fn test_limit_switches_at_both_ends() {
        let mut sim = SimulatedPlotter::new(10, 10, 5, 5);
        assert!(!sim.is_at_limit(Axis::X));
        sim.place_head(Axis::X, 0);
        assert!(sim.is_at_limit(Axis::X));
        sim.place_head(Axis::X, 10);
        assert!(sim.is_at_limit(Axis::X));
        assert!(!sim.is_at_limit(Axis::Y));
    }

    #[test]
    fn test_pen_and_clock_recording() {
        let mut sim = SimulatedPlotter::default();
        sim.set_pen(true);
        sim.set_pen(true);
        sim.set_pen(false);
        assert_eq!(sim.pen_transitions(), 2);
        assert!(!sim.pen_down());

        sim.delay_ms(4);
        sim.delay_ms(100);
        assert_eq!(sim.elapsed_ms(), 104);

        sim.emit("Cutting.");
        assert_eq!(sim.take_status_lines(), vec!["Cutting.".to_string()]);
        assert!(sim.status_lines().is_empty());
    }
}
