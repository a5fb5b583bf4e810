//! Type aliases and helpers for shared state.

pub mod aliases;

pub use aliases::{thread_safe, ThreadSafe};
