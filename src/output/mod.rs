mod csv;
mod figure;
mod json;
mod text;

use serde::Serialize;

use crate::analysis::UnitMode;
use crate::playback::PlaybackFrame;
use crate::telemetry::SampleTable;

pub use self::csv::CsvFormatter;
pub use self::figure::{LogOverview, render_figure, render_summary};
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One playback tick flattened for line-oriented output
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackLine {
    pub tick: u64,
    pub time_s: f64,
    pub window_start_s: f64,
    pub window_end_s: f64,
    pub rows: usize,
    pub unit: UnitMode,
    pub roll_acceleration_command: f64,
    pub measured_roll_rate: f64,
    pub roll_attitude_command: f64,
    pub measured_roll_attitude: f64,
    pub halted: bool,
}

impl PlaybackLine {
    /// Values at the frame cursor, read from a table already in display units
    pub fn from_frame(frame: &PlaybackFrame, table: &SampleTable, halted: bool) -> Option<Self> {
        let sample = table.get(frame.index)?;
        let start = table.get(frame.window.lo)?;
        Some(Self {
            tick: frame.tick,
            time_s: sample.time_s,
            window_start_s: start.time_s,
            window_end_s: sample.time_s,
            rows: frame.window.len(),
            unit: table.unit(),
            roll_acceleration_command: sample.roll_acceleration_command,
            measured_roll_rate: sample.measured_roll_rate,
            roll_attitude_command: sample.roll_attitude_command,
            measured_roll_attitude: sample.measured_roll_attitude,
            halted,
        })
    }
}

pub trait Formatter: Send {
    fn format(&self, line: &PlaybackLine) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
