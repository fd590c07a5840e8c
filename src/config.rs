//! Configuration for the roll sweep dashboard.
//!
//! ## Config file
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! log_path = "roll_attitude_frequency_sweep.csv"
//!
//! [playback]
//! tick_period_ms = 1000
//! history_seconds = 30
//!
//! [display]
//! unit = "degrees"
//!
//! [post_process]
//! start_time_s = 170.0
//! slider_step_s = 20.0
//! channels = ["measuredRollRate_rps", "measuredRollAttitude_rad"]
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::analysis::UnitMode;
use crate::constants::{
    DEFAULT_HISTORY_S, DEFAULT_SLIDER_STEP_S, DEFAULT_TICK_PERIOD_MS, HISTORY_MAX_S,
    HISTORY_STEP_S, TICK_PERIOD_MAX_MS, TICK_PERIOD_MIN_MS, TICK_PERIOD_STEP_MS,
};
use crate::error::{Result, SweepError};
use crate::telemetry::Channel;

/// Playback tick period
///
/// Can be specified in milliseconds or seconds.
///
/// # Parsing formats
/// - `1000` - milliseconds (no suffix)
/// - `1000ms` - milliseconds (explicit)
/// - `1s` or `0.5s` - seconds
///
/// # Example
/// ```
/// use rollsweep::config::TickPeriod;
///
/// let period: TickPeriod = "2.5s".parse().unwrap();
/// assert_eq!(period.as_millis(), 2500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPeriod(u32);

impl TickPeriod {
    pub fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u32 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl Default for TickPeriod {
    fn default() -> Self {
        Self(DEFAULT_TICK_PERIOD_MS)
    }
}

impl fmt::Display for TickPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl FromStr for TickPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(num) = s.strip_suffix("ms") {
            let ms: u32 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid tick period: {}", s))?;
            if ms == 0 {
                return Err("tick period must be positive".to_string());
            }
            return Ok(Self(ms));
        }

        if let Some(num) = s.strip_suffix('s') {
            let secs: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid tick period: {}", s))?;
            let ms = (secs * 1000.0).round();
            if ms <= 0.0 || ms > u32::MAX as f64 {
                return Err("tick period must be positive".to_string());
            }
            return Ok(Self(ms as u32));
        }

        let ms: u32 = s
            .parse()
            .map_err(|_| format!("invalid tick period: {}", s))?;
        if ms == 0 {
            return Err("tick period must be positive".to_string());
        }
        Ok(Self(ms))
    }
}

/// Top-level dashboard configuration
///
/// Use `DashboardConfig::default()` for the stock settings or
/// [`DashboardConfig::load`] to read a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Log to open when none is given on the command line
    pub log_path: Option<PathBuf>,
    /// Playback view settings
    pub playback: PlaybackConfig,
    /// Display settings shared by both views
    pub display: DisplayConfig,
    /// Post-processing view settings
    pub post_process: PostProcessConfig,
}

/// Playback view configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Milliseconds between playback ticks (100-200000, multiple of 100)
    pub tick_period_ms: u32,
    /// Seconds of history shown behind the cursor (0-200, multiple of 5)
    pub history_seconds: u32,
}

/// Display configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Unit for angle and rate columns
    pub unit: UnitMode,
}

/// Post-processing view configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostProcessConfig {
    /// Start of the inspected range; defaults to 30 s before the end of the log
    pub start_time_s: Option<f64>,
    /// Start-time selector step in seconds
    pub slider_step_s: f64,
    /// Columns shown in the overlay plots
    pub channels: Vec<Channel>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            history_seconds: DEFAULT_HISTORY_S,
        }
    }
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            start_time_s: None,
            slider_step_s: DEFAULT_SLIDER_STEP_S,
            channels: Vec::new(),
        }
    }
}

impl PlaybackConfig {
    pub fn tick_period(&self) -> TickPeriod {
        TickPeriod::from_millis(self.tick_period_ms)
    }

    /// Check the values against the selector limits
    pub fn validate(&self) -> Result<()> {
        let ms = self.tick_period_ms;
        if !(TICK_PERIOD_MIN_MS..=TICK_PERIOD_MAX_MS).contains(&ms) {
            return Err(SweepError::Config(format!(
                "tick period {} ms outside {}-{} ms",
                ms, TICK_PERIOD_MIN_MS, TICK_PERIOD_MAX_MS
            )));
        }
        if ms % TICK_PERIOD_STEP_MS != 0 {
            return Err(SweepError::Config(format!(
                "tick period {} ms is not a multiple of {} ms",
                ms, TICK_PERIOD_STEP_MS
            )));
        }
        if self.history_seconds > HISTORY_MAX_S {
            return Err(SweepError::Config(format!(
                "history {} s exceeds {} s",
                self.history_seconds, HISTORY_MAX_S
            )));
        }
        if self.history_seconds % HISTORY_STEP_S != 0 {
            return Err(SweepError::Config(format!(
                "history {} s is not a multiple of {} s",
                self.history_seconds, HISTORY_STEP_S
            )));
        }
        Ok(())
    }
}

impl PostProcessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.slider_step_s.is_nan() || self.slider_step_s <= 0.0 {
            return Err(SweepError::Config(format!(
                "slider step must be positive, got {}",
                self.slider_step_s
            )));
        }
        Ok(())
    }
}

impl DashboardConfig {
    /// Read and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SweepError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.post_process.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_period_plain_millis() {
        let period: TickPeriod = "1000".parse().unwrap();
        assert_eq!(period.as_millis(), 1000);
    }

    #[test]
    fn test_tick_period_explicit_millis() {
        let period: TickPeriod = "200ms".parse().unwrap();
        assert_eq!(period.as_millis(), 200);
    }

    #[test]
    fn test_tick_period_seconds() {
        let period: TickPeriod = "1s".parse().unwrap();
        assert_eq!(period.as_millis(), 1000);

        let period: TickPeriod = "0.5s".parse().unwrap();
        assert_eq!(period.as_millis(), 500);
    }

    #[test]
    fn test_tick_period_invalid() {
        assert!("abc".parse::<TickPeriod>().is_err());
        assert!("-100ms".parse::<TickPeriod>().is_err());
        assert!("0s".parse::<TickPeriod>().is_err());
        assert!("0".parse::<TickPeriod>().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.playback.tick_period_ms, 1000);
        assert_eq!(config.playback.history_seconds, 30);
        assert_eq!(config.display.unit, UnitMode::Degrees);
    }

    #[test]
    fn test_playback_limits() {
        let mut playback = PlaybackConfig::default();

        playback.tick_period_ms = 50;
        assert!(playback.validate().is_err());
        playback.tick_period_ms = 200_100;
        assert!(playback.validate().is_err());
        playback.tick_period_ms = 150;
        assert!(playback.validate().is_err());
        playback.tick_period_ms = 200_000;
        assert!(playback.validate().is_ok());

        playback.history_seconds = 205;
        assert!(playback.validate().is_err());
        playback.history_seconds = 12;
        assert!(playback.validate().is_err());
        playback.history_seconds = 0;
        assert!(playback.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = DashboardConfig::from_toml(
            r#"
            log_path = "sweep.csv"

            [playback]
            tick_period_ms = 500

            [display]
            unit = "rad"

            [post_process]
            start_time_s = 100.0
            channels = ["measuredRollRate_rps", "attitude"]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_path, Some(PathBuf::from("sweep.csv")));
        assert_eq!(config.playback.tick_period_ms, 500);
        assert_eq!(config.playback.history_seconds, 30);
        assert_eq!(config.display.unit, UnitMode::Radians);
        assert_eq!(config.post_process.start_time_s, Some(100.0));
        assert_eq!(config.post_process.slider_step_s, 20.0);
        assert_eq!(
            config.post_process.channels,
            vec![Channel::MeasuredRollRate, Channel::MeasuredRollAttitude]
        );
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(DashboardConfig::from_toml("[playback]\ntick_period_ms = 123\n").is_err());
        assert!(DashboardConfig::from_toml("[display]\nunit = \"grad\"\n").is_err());
        assert!(
            DashboardConfig::from_toml("[post_process]\nchannels = [\"yaw\"]\n").is_err()
        );
    }
}
