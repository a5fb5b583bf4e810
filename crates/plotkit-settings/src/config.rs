//! Configuration management for PlotKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Machine geometry (motor pitch per axis)
//! - Timing (tick period, idle window, pen settle, homing budget)
//! - Hilbert image placement
//! - Simulated bed used by the terminal binary

use crate::error::{SettingsError, SettingsResult};
use plotkit_core::{SimulatedPlotter, UnitConverter, DEFAULT_X_PITCH_MM, DEFAULT_Y_PITCH_MM};
use plotkit_motion::{HilbertParams, SchedulerConfig, DEFAULT_PEN_SETTLE_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Motor geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Travel per motor step on X in mm
    pub x_pitch_mm: f64,
    /// Travel per motor step on Y in mm
    pub y_pitch_mm: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            x_pitch_mm: DEFAULT_X_PITCH_MM,
            y_pitch_mm: DEFAULT_Y_PITCH_MM,
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Delay between ticks while the head is inside the bed
    pub tick_ms: u32,
    /// Inactivity before the motors are released
    pub idle_time_ms: u32,
    /// Wait after each pen transition
    pub pen_settle_ms: u32,
    /// Step budget for each homing phase
    pub homing_max_steps: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_ms: 4,
            idle_time_ms: 2000,
            pen_settle_ms: DEFAULT_PEN_SETTLE_MS,
            homing_max_steps: 100_000,
        }
    }
}

/// Hilbert curve image placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HilbertSettings {
    /// Edge length of the square image in mm
    pub image_size_mm: f64,
    /// Lower-left corner X in mm
    pub origin_x_mm: f64,
    /// Lower-left corner Y in mm
    pub origin_y_mm: f64,
}

impl Default for HilbertSettings {
    fn default() -> Self {
        let params = HilbertParams::default();
        Self {
            image_size_mm: params.image_size_mm,
            origin_x_mm: params.origin_x_mm,
            origin_y_mm: params.origin_y_mm,
        }
    }
}

/// Simulated bed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// X travel between the switches in motor steps
    pub x_travel_steps: i32,
    /// Y travel between the switches in motor steps
    pub y_travel_steps: i32,
    /// Power-on head position on X in motor steps
    pub start_x: i32,
    /// Power-on head position on Y in motor steps
    pub start_y: i32,
    /// Sleep for real on every delay
    pub realtime: bool,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            x_travel_steps: 3000,
            y_travel_steps: 2500,
            start_x: 1500,
            start_y: 1200,
            realtime: false,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Motor geometry
    pub machine: MachineSettings,
    /// Control loop timing
    pub timing: TimingSettings,
    /// Hilbert image placement
    pub hilbert: HilbertSettings,
    /// Simulated bed
    pub simulator: SimulatorSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/plotkit/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("plotkit").join("config.toml"))
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Validate machine settings
        for (key, pitch) in [
            ("machine.x_pitch_mm", self.machine.x_pitch_mm),
            ("machine.y_pitch_mm", self.machine.y_pitch_mm),
        ] {
            if !pitch.is_finite() || pitch <= 0.0 {
                return Err(SettingsError::invalid(key, "must be a positive number"));
            }
        }

        // Validate timing
        if self.timing.tick_ms == 0 {
            return Err(SettingsError::invalid("timing.tick_ms", "must be > 0"));
        }
        if self.timing.homing_max_steps == 0 {
            return Err(SettingsError::invalid(
                "timing.homing_max_steps",
                "must be > 0",
            ));
        }

        // Validate Hilbert placement
        if !self.hilbert.image_size_mm.is_finite() || self.hilbert.image_size_mm <= 0.0 {
            return Err(SettingsError::invalid(
                "hilbert.image_size_mm",
                "must be a positive number",
            ));
        }
        for (key, origin) in [
            ("hilbert.origin_x_mm", self.hilbert.origin_x_mm),
            ("hilbert.origin_y_mm", self.hilbert.origin_y_mm),
        ] {
            if !origin.is_finite() || origin < 0.0 {
                return Err(SettingsError::invalid(key, "must be >= 0"));
            }
        }

        // Validate simulated bed
        let sim = &self.simulator;
        for (key, travel, start) in [
            ("simulator.start_x", sim.x_travel_steps, sim.start_x),
            ("simulator.start_y", sim.y_travel_steps, sim.start_y),
        ] {
            if travel <= 2 {
                return Err(SettingsError::invalid(
                    key,
                    format!("travel of {} steps is too short", travel),
                ));
            }
            if start <= 0 || start >= travel {
                return Err(SettingsError::invalid(
                    key,
                    format!("must lie strictly between 0 and {}", travel),
                ));
            }
        }

        Ok(())
    }

    /// Unit conversion for the configured pitches
    pub fn units(&self) -> UnitConverter {
        UnitConverter::new(self.machine.x_pitch_mm, self.machine.y_pitch_mm).unwrap_or_default()
    }

    /// Runtime parameters for the control loop
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            units: self.units(),
            tick_ms: self.timing.tick_ms,
            idle_time_ms: self.timing.idle_time_ms,
            pen_settle_ms: self.timing.pen_settle_ms,
            homing_max_steps: self.timing.homing_max_steps,
            hilbert: HilbertParams {
                image_size_mm: self.hilbert.image_size_mm,
                origin_x_mm: self.hilbert.origin_x_mm,
                origin_y_mm: self.hilbert.origin_y_mm,
            },
        }
    }

    /// Simulated plotter for the configured bed
    pub fn simulator(&self) -> SimulatedPlotter {
        let sim = &self.simulator;
        SimulatedPlotter::new(sim.x_travel_steps, sim.y_travel_steps, sim.start_x, sim.start_y)
            .with_realtime(sim.realtime)
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.scheduler_config(), SchedulerConfig::default());
        assert_eq!(config.units(), UnitConverter::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::new();
        config.timing.tick_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "timing.tick_ms"
        ));

        let mut config = Config::new();
        config.machine.y_pitch_mm = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.simulator.start_x = 3000;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.hilbert.origin_y_mm = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[timing]\ntick_ms = 2\n").unwrap();
        assert_eq!(config.timing.tick_ms, 2);
        assert_eq!(config.timing.idle_time_ms, 2000);
        assert_eq!(config.scheduler_config().idle_threshold(), 1000);
        assert_eq!(config.machine, MachineSettings::default());
    }

    #[test]
    fn test_simulator_from_settings() {
        let mut config = Config::new();
        config.simulator.start_x = 10;
        config.simulator.start_y = 20;
        assert_eq!(config.simulator().position(), (10, 20));
    }
}
