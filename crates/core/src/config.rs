//! Immutable startup configuration.
//!
//! `Config` is built once from the already-parsed command line and shared
//! with the engine. Nothing in it changes at runtime; the one runtime-editable
//! value (the refresh interval) is copied into the engine's shared state.

use crate::commands::CommandSet;
use crate::constants::{DEFAULT_CYCLE_INTERVAL_SECS, DEFAULT_INTERVAL_SECS, DISPLAY_TICK_MS};
use crate::errors::{Error, Result};
use std::time::Duration;

/// Timer and mode settings for a session
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Seconds between two runs of the active command
    pub interval: f64,

    /// Seconds between two automatic command switches
    pub cycle_interval: f64,

    /// Whether cycling mode is on at startup
    pub cycle: bool,

    /// Display loop tick
    pub tick: Duration,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL_SECS,
            cycle_interval: DEFAULT_CYCLE_INTERVAL_SECS,
            cycle: false,
            tick: Duration::from_millis(DISPLAY_TICK_MS),
        }
    }
}

/// Configuration for one cyclewatch session
#[derive(Debug, Clone)]
pub struct Config {
    pub commands: CommandSet,
    pub runtime_settings: RuntimeSettings,
}

impl Config {
    /// Create a new Config, validating the timer settings
    pub fn new(commands: CommandSet, runtime_settings: RuntimeSettings) -> Result<Self> {
        validate_seconds("interval", runtime_settings.interval)?;
        validate_seconds("cycle interval", runtime_settings.cycle_interval)?;
        if runtime_settings.tick.is_zero() {
            return Err(Error::configuration("display tick must be non-zero"));
        }

        Ok(Self {
            commands,
            runtime_settings,
        })
    }
}

fn validate_seconds(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "{name} must be a positive number of seconds, got {value}"
        )))
    }
}

/// Longest wait a timer is ever armed for; larger intervals are treated as
/// "practically never"
pub const MAX_WAIT: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Shortest timer period; tokio intervals reject a zero period
pub const MIN_WAIT: Duration = Duration::from_millis(1);

/// Convert interval seconds into a timer duration within
/// [`MIN_WAIT`]..=[`MAX_WAIT`]
pub fn interval_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds)
        .map_or(MAX_WAIT, |duration| duration.clamp(MIN_WAIT, MAX_WAIT))
}

/// Parse a user-supplied interval in seconds.
///
/// Accepts any positive, finite floating-point number. Surrounding whitespace
/// is ignored.
pub fn parse_interval(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|e| Error::interval_parse(trimmed, format!("{e}")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(Error::interval_parse(
            trimmed,
            "must be a positive number of seconds",
        ));
    }
    Ok(value)
}
