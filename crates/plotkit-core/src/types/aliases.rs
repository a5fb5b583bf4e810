//! Type aliases for shared plotter state.
//!
//! The control loop is single threaded, but the terminal binary reads
//! commands on a second thread. Every access to the head position, axis
//! areas, and job slots then goes through one lock.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plotkit_core::types::*;
//!
//! // Instead of: Arc<Mutex<Scheduler<SimulatedPlotter>>>
//! let shared: ThreadSafe<Scheduler<SimulatedPlotter>> = thread_safe(scheduler);
//! shared.lock().tick();
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
