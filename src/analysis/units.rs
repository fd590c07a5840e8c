//! Radian/degree conversion of angle-bearing columns.
//!
//! The time axis is independent of the display unit and is never rescaled.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::telemetry::SampleTable;

/// Unit used for every angle and angular-rate column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[serde(alias = "rad")]
    #[value(alias = "rad")]
    Radians,
    #[default]
    #[serde(alias = "deg")]
    #[value(alias = "deg")]
    Degrees,
}

impl UnitMode {
    /// Scale factor that takes a value expressed in `from` into `self`
    pub fn factor_from(&self, from: UnitMode) -> f64 {
        match (from, self) {
            (UnitMode::Radians, UnitMode::Degrees) => 180.0 / PI,
            (UnitMode::Degrees, UnitMode::Radians) => PI / 180.0,
            _ => 1.0,
        }
    }

    pub fn convert_value(&self, value: f64, from: UnitMode) -> f64 {
        value * self.factor_from(from)
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitMode::Radians => f.write_str("radians"),
            UnitMode::Degrees => f.write_str("degrees"),
        }
    }
}

impl FromStr for UnitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rad" | "radians" => Ok(UnitMode::Radians),
            "deg" | "degrees" => Ok(UnitMode::Degrees),
            other => Err(format!("invalid unit mode: {}", other)),
        }
    }
}

/// Convert a table to `target` units
///
/// Returns a fresh table; `time_s` and the sample period are carried over
/// untouched. Converting to the unit the table is already in is a copy.
pub fn convert(table: &SampleTable, target: UnitMode) -> SampleTable {
    let factor = target.factor_from(table.unit());
    if factor == 1.0 {
        return table.clone();
    }
    let samples = table
        .samples()
        .iter()
        .map(|s| s.map_signals(|v| v * factor))
        .collect();
    table.derived(samples, target)
}
