//! # PlotKit
//!
//! Motion control for a two-axis stepper-motor plotter:
//! - Straight lines (Bresenham) and circles (incremental octant reconstruction)
//! - A built-in demo figure and Hilbert space-filling curves
//! - Limit-switch boundary tracking and homing
//! - Idle power-save of the motors
//!
//! ## Architecture
//!
//! PlotKit is organized as a workspace with multiple crates:
//!
//! 1. **plotkit-core** - Data model, errors, unit conversion, hardware traits, simulator
//! 2. **plotkit-motion** - Stepper sequencing, drawing jobs, command parsing, scheduler
//! 3. **plotkit-settings** - Configuration file handling and validation
//! 4. **plotkit** - Terminal input, DXF import and the binary that integrates all crates
//!
//! Every drawing job advances by at most one logical unit per axis per tick,
//! so the control loop stays responsive to new commands while drawing.

pub mod dxf_import;
pub mod terminal;

pub use plotkit_core::{data, hal, units};

pub use plotkit_core::{
    thread_safe, Axis, AxisArea, CommandError, Direction, Error, JobError, JobState,
    LogicalPosition, MotionStatus, PenState, PlotterHal, RealPosition, Result, SimulatedPlotter,
    ThreadSafe, UnitConverter,
};

pub use plotkit_motion::{
    Command, ComplexJob, DrawingJob, PlotterState, Scheduler, SchedulerConfig, TickOutcome,
};

pub use plotkit_settings::{Config, SettingsError};

pub use terminal::TerminalInput;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only plotter status lines
/// - RUST_LOG environment variable support (INFO by default)
/// - JSON records instead of pretty text when `PLOTKIT_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // status lines are echoed on stdout already
    let env_filter = EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into())
        .add_directive("plotkit::status=warn".parse()?);

    let json = std::env::var("PLOTKIT_LOG_FORMAT").is_ok_and(|format| format == "json");
    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
