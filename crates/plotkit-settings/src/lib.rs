//! PlotKit Settings Crate
//!
//! Handles the plotter configuration file and turns it into the runtime
//! parameters of the motion crate.

pub mod config;
pub mod error;

pub use config::{Config, HilbertSettings, MachineSettings, SimulatorSettings, TimingSettings};
pub use error::{SettingsError, SettingsResult};
