use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::UnitMode;
use crate::error::SweepError;

/// One row of a roll frequency-sweep log
///
/// Field names on the wire are the CSV header names. Angle-bearing fields are
/// in the unit of the table that holds them (radians for a freshly loaded log).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "time_s")]
    pub time_s: f64,
    #[serde(rename = "rollAccelerationCommand_rps2")]
    pub roll_acceleration_command: f64,
    #[serde(rename = "measuredRollRate_rps")]
    pub measured_roll_rate: f64,
    #[serde(rename = "rollAttitudeCommand_rad")]
    pub roll_attitude_command: f64,
    #[serde(rename = "measuredRollAttitude_rad")]
    pub measured_roll_attitude: f64,
}

impl Sample {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::RollAccelerationCommand => self.roll_acceleration_command,
            Channel::MeasuredRollRate => self.measured_roll_rate,
            Channel::RollAttitudeCommand => self.roll_attitude_command,
            Channel::MeasuredRollAttitude => self.measured_roll_attitude,
        }
    }

    /// Apply `f` to every angle-bearing field, leaving time alone.
    pub fn map_signals<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            time_s: self.time_s,
            roll_acceleration_command: f(self.roll_acceleration_command),
            measured_roll_rate: f(self.measured_roll_rate),
            roll_attitude_command: f(self.roll_attitude_command),
            measured_roll_attitude: f(self.measured_roll_attitude),
        }
    }
}

/// Recorded signal column
///
/// Parses from its CSV header name or a short kebab-case alias
/// (`acceleration-command`, `roll-rate`, `attitude-command`, `attitude`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "rollAccelerationCommand_rps2", alias = "acceleration-command")]
    RollAccelerationCommand,
    #[serde(rename = "measuredRollRate_rps", alias = "roll-rate")]
    MeasuredRollRate,
    #[serde(rename = "rollAttitudeCommand_rad", alias = "attitude-command")]
    RollAttitudeCommand,
    #[serde(rename = "measuredRollAttitude_rad", alias = "attitude")]
    MeasuredRollAttitude,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::RollAccelerationCommand,
        Channel::MeasuredRollRate,
        Channel::RollAttitudeCommand,
        Channel::MeasuredRollAttitude,
    ];

    /// CSV header name
    pub fn column_name(&self) -> &'static str {
        match self {
            Channel::RollAccelerationCommand => "rollAccelerationCommand_rps2",
            Channel::MeasuredRollRate => "measuredRollRate_rps",
            Channel::RollAttitudeCommand => "rollAttitudeCommand_rad",
            Channel::MeasuredRollAttitude => "measuredRollAttitude_rad",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Channel::RollAccelerationCommand => "acceleration-command",
            Channel::MeasuredRollRate => "roll-rate",
            Channel::RollAttitudeCommand => "attitude-command",
            Channel::MeasuredRollAttitude => "attitude",
        }
    }

    /// Short trace name used in stacked panels
    pub fn trace_label(&self) -> &'static str {
        match self {
            Channel::RollAccelerationCommand => "pdot cmd",
            Channel::MeasuredRollRate => "p",
            Channel::RollAttitudeCommand => "phi cmd",
            Channel::MeasuredRollAttitude => "phi",
        }
    }

    /// Human-readable name used in selectors
    pub fn description(&self) -> &'static str {
        match self {
            Channel::RollAccelerationCommand => "Roll Acceleration Command",
            Channel::MeasuredRollRate => "Roll Rate",
            Channel::RollAttitudeCommand => "Roll Command",
            Channel::MeasuredRollAttitude => "Roll Attitude",
        }
    }

    pub fn axis_label(&self, unit: UnitMode) -> &'static str {
        match (self, unit) {
            (Channel::RollAccelerationCommand, UnitMode::Radians) => "rad/s^2",
            (Channel::RollAccelerationCommand, UnitMode::Degrees) => "deg/s^2",
            (Channel::MeasuredRollRate, UnitMode::Radians) => "rad/s",
            (Channel::MeasuredRollRate, UnitMode::Degrees) => "deg/s",
            (_, UnitMode::Radians) => "rad",
            (_, UnitMode::Degrees) => "deg",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Channel {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Channel::ALL
            .into_iter()
            .find(|c| c.column_name() == s || c.alias() == s)
            .ok_or_else(|| SweepError::UnknownChannel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_column_name() {
        for channel in Channel::ALL {
            assert_eq!(channel.column_name().parse::<Channel>().unwrap(), channel);
        }
    }

    #[test]
    fn test_channel_from_alias() {
        assert_eq!(
            "roll-rate".parse::<Channel>().unwrap(),
            Channel::MeasuredRollRate
        );
        assert_eq!(
            " attitude ".parse::<Channel>().unwrap(),
            Channel::MeasuredRollAttitude
        );
    }

    #[test]
    fn test_channel_unknown() {
        assert!(matches!(
            "yawRate_rps".parse::<Channel>(),
            Err(SweepError::UnknownChannel(_))
        ));
        assert!("time_s".parse::<Channel>().is_err());
    }

    #[test]
    fn test_map_signals_keeps_time() {
        let sample = Sample {
            time_s: 1.5,
            roll_acceleration_command: 1.0,
            measured_roll_rate: 2.0,
            roll_attitude_command: 3.0,
            measured_roll_attitude: 4.0,
        };
        let doubled = sample.map_signals(|v| v * 2.0);
        assert_eq!(doubled.time_s, 1.5);
        assert_eq!(doubled.get(Channel::MeasuredRollAttitude), 8.0);
    }
}
