//! Simulation configuration.
//!
//! Defaults reproduce the reference setup: a four-hour window from 06:00 to
//! 10:00, one simulated minute per tick and a tick every 100ms. Each value
//! can be overridden from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{ClockTime, TimeError};

/// Environment variable names.
pub const ENV_START: &str = "TRAIN_SIM_START";
pub const ENV_END: &str = "TRAIN_SIM_END";
pub const ENV_TICK_MS: &str = "TRAIN_SIM_TICK_MS";
pub const ENV_SPEED: &str = "TRAIN_SIM_SPEED";
pub const ENV_ADDR: &str = "TRAIN_SIM_ADDR";
pub const ENV_TIMETABLE: &str = "TRAIN_SIM_TIMETABLE";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A window bound is not a valid HH:MM time
    #[error("{var}: {source}")]
    Time {
        var: &'static str,
        #[source]
        source: TimeError,
    },

    /// A value could not be parsed
    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },

    /// The window does not end after it starts
    #[error("simulation window must end after it starts ({start} to {end})")]
    EmptyWindow { start: ClockTime, end: ClockTime },

    /// The tick interval is zero
    #[error("tick interval must be at least 1ms")]
    ZeroTick,
}

/// Configuration parameters for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Wall-clock time at simulation minute 0.
    pub window_start: ClockTime,

    /// Wall-clock time at the end of the window.
    pub window_end: ClockTime,

    /// Real time between ticks (milliseconds).
    pub tick_interval_ms: u64,

    /// Simulated minutes advanced per tick at startup.
    pub initial_speed: i32,

    /// Spacing of time-axis labels (minutes).
    pub axis_step_mins: u32,

    /// Address the HTTP control surface listens on.
    pub addr: SocketAddr,

    /// Timetable JSON file; the built-in reference timetable when unset.
    pub timetable_path: Option<PathBuf>,
}

impl SimConfig {
    /// Create a new configuration for the given window and cadence.
    pub fn new(
        window_start: ClockTime,
        window_end: ClockTime,
        tick_interval_ms: u64,
        initial_speed: i32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            window_start,
            window_end,
            tick_interval_ms,
            initial_speed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; set but invalid ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_START) {
            config.window_start = parse_clock(ENV_START, &value)?;
        }
        if let Some(value) = lookup(ENV_END) {
            config.window_end = parse_clock(ENV_END, &value)?;
        }
        if let Some(value) = lookup(ENV_TICK_MS) {
            config.tick_interval_ms = parse_value(ENV_TICK_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_SPEED) {
            config.initial_speed = parse_value(ENV_SPEED, &value)?;
        }
        if let Some(value) = lookup(ENV_ADDR) {
            config.addr = parse_value(ENV_ADDR, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMETABLE) {
            config.timetable_path = Some(PathBuf::from(value));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the window and cadence are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_minutes() == 0 {
            return Err(ConfigError::EmptyWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    /// Length of the window in simulated minutes (0 if it is empty).
    pub fn total_minutes(&self) -> u32 {
        self.window_end
            .minutes_since(self.window_start)
            .unwrap_or(0)
    }

    /// Returns the tick interval as a Duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_start: ClockTime::from_minutes(6 * 60), // 06:00
            window_end: ClockTime::from_minutes(10 * 60),  // 10:00
            tick_interval_ms: 100,
            initial_speed: 1,
            axis_step_mins: 30,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timetable_path: None,
        }
    }
}

fn parse_clock(var: &'static str, value: &str) -> Result<ClockTime, ConfigError> {
    ClockTime::parse_hhmm(value.trim()).map_err(|source| ConfigError::Time { var, source })
}

fn parse_value<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
