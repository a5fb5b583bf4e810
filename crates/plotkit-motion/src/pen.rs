//! Pen actuator
//!
//! The pen only changes level when the requested state differs from the
//! current one, and every change waits for the pen to settle before the
//! next motor pulse.

use plotkit_core::{Delay, PenPort, PenState, StatusSink};

/// Default settle time after a pen transition
pub const DEFAULT_PEN_SETTLE_MS: u32 = 100;

/// Up/down pen with a settle delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenActuator {
    state: PenState,
    settle_ms: u32,
}

impl PenActuator {
    /// Create an actuator assumed to be up
    pub fn new(settle_ms: u32) -> Self {
        Self {
            state: PenState::Up,
            settle_ms,
        }
    }

    /// Current pen state
    pub fn state(&self) -> PenState {
        self.state
    }

    /// Drive the output up without waiting (power-on reset)
    pub fn initialize<H: PenPort>(&mut self, hal: &mut H) {
        hal.set_pen(false);
        self.state = PenState::Up;
    }

    /// Request a state; returns true if the pen actually moved
    pub fn set<H>(&mut self, hal: &mut H, state: PenState) -> bool
    where
        H: PenPort + Delay + StatusSink,
    {
        if self.state == state {
            return false;
        }

        hal.set_pen(state == PenState::Down);
        self.state = state;
        hal.emit(&format!("Pen down = {}", state.as_flag()));
        tracing::debug!("Pen {:?}, settling for {}ms", state, self.settle_ms);
        hal.delay_ms(self.settle_ms);
        true
    }

    /// Lower the pen when `cutting`, raise it otherwise
    pub fn apply_intent<H>(&mut self, hal: &mut H, cutting: bool) -> bool
    where
        H: PenPort + Delay + StatusSink,
    {
        let state = if cutting { PenState::Down } else { PenState::Up };
        self.set(hal, state)
    }
}

impl Default for PenActuator {
    fn default() -> Self {
        Self::new(DEFAULT_PEN_SETTLE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_core::SimulatedPlotter;

    #[test]
    fn test_transition_waits_once() {
        let mut sim = SimulatedPlotter::default();
        let mut pen = PenActuator::new(100);

        assert!(pen.set(&mut sim, PenState::Down));
        assert!(!pen.set(&mut sim, PenState::Down));
        assert_eq!(pen.state(), PenState::Down);
        assert!(sim.pen_down());
        assert_eq!(sim.elapsed_ms(), 100);
        assert_eq!(sim.status_lines(), &["Pen down = 1".to_string()]);

        assert!(pen.apply_intent(&mut sim, false));
        assert!(!sim.pen_down());
        assert_eq!(sim.elapsed_ms(), 200);
        assert_eq!(sim.pen_transitions(), 2);
    }

    #[test]
    fn test_initialize_does_not_wait() {
        let mut sim = SimulatedPlotter::default();
        let mut pen = PenActuator::default();
        pen.initialize(&mut sim);
        assert_eq!(pen.state(), PenState::Up);
        assert_eq!(sim.elapsed_ms(), 0);
        assert!(sim.status_lines().is_empty());
    }
}
