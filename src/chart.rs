//! Chart-ready series for the playback and post-processing views.
//!
//! Builders take a table already converted to the display unit and produce
//! plain `[x, y]` series; renderers only decide how to draw them.

use serde::Serialize;

use crate::analysis::{DisplayWindow, Spectrum, UnitMode};
use crate::telemetry::{Channel, SampleTable};

pub const TIME_AXIS_LABEL: &str = "Time [s]";
pub const FREQUENCY_AXIS_LABEL: &str = "Frequency [Hz]";
pub const BASELINE_NAME: &str = "baseline";

/// One of the three stacked time-domain panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    AccelerationCommand,
    RollRate,
    RollAttitude,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [
        PanelKind::AccelerationCommand,
        PanelKind::RollRate,
        PanelKind::RollAttitude,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::AccelerationCommand => "Roll Acceleration Command",
            PanelKind::RollRate => "Roll Rate",
            PanelKind::RollAttitude => "Roll Attitude",
        }
    }

    pub fn channels(&self) -> &'static [Channel] {
        match self {
            PanelKind::AccelerationCommand => &[Channel::RollAccelerationCommand],
            PanelKind::RollRate => &[Channel::MeasuredRollRate],
            PanelKind::RollAttitude => {
                &[Channel::RollAttitudeCommand, Channel::MeasuredRollAttitude]
            }
        }
    }

    fn radian_limit(&self) -> f64 {
        match self {
            PanelKind::AccelerationCommand => 2.0,
            PanelKind::RollRate => 0.5,
            PanelKind::RollAttitude => 0.11,
        }
    }

    /// Symmetric y-axis limit of the playback panel in `unit`
    pub fn axis_limit(&self, unit: UnitMode) -> f64 {
        unit.convert_value(self.radian_limit(), UnitMode::Radians)
    }

    pub fn axis_range(&self, unit: UnitMode) -> [f64; 2] {
        let limit = self.axis_limit(unit);
        [-limit, limit]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Zero line over the given x values
    pub fn baseline(xs: impl IntoIterator<Item = f64>) -> Self {
        Self::new(BASELINE_NAME, xs.into_iter().map(|x| [x, 0.0]).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub y_label: String,
    pub y_range: Option<[f64; 2]>,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub panels: Vec<Panel>,
}

fn stacked_panels(table: &SampleTable, window: DisplayWindow, fixed_range: bool) -> Vec<Panel> {
    let unit = table.unit();
    PanelKind::ALL
        .iter()
        .map(|kind| {
            let series = kind
                .channels()
                .iter()
                .map(|&channel| {
                    Series::new(channel.trace_label(), table.points(channel, window.rows()))
                })
                .collect();
            Panel {
                title: kind.title().to_string(),
                y_label: kind.channels()[0].axis_label(unit).to_string(),
                y_range: fixed_range.then(|| kind.axis_range(unit)),
                series,
            }
        })
        .collect()
}

/// Three stacked panels over a playback window, with unit-dependent y limits
pub fn playback_figure(table: &SampleTable, window: DisplayWindow) -> Figure {
    Figure {
        title: "Real Time Data".to_string(),
        x_label: TIME_AXIS_LABEL.to_string(),
        panels: stacked_panels(table, window, true),
    }
}

/// Three stacked panels from `window.lo` to the end of the log
pub fn strip_figure(table: &SampleTable, window: DisplayWindow) -> Figure {
    Figure {
        title: "Post Processing".to_string(),
        x_label: TIME_AXIS_LABEL.to_string(),
        panels: stacked_panels(table, window, false),
    }
}

fn overlay_title(domain: &str, channels: &[Channel]) -> String {
    let names: Vec<&str> = channels.iter().map(|c| c.column_name()).collect();
    format!("{} [{}]", domain, names.join(", "))
}

/// Single panel of the chosen columns over a window, on a zero baseline
///
/// With no columns selected only the baseline is drawn.
pub fn time_overlay(table: &SampleTable, window: DisplayWindow, channels: &[Channel]) -> Figure {
    let mut series = vec![Series::baseline(table.times(window.rows()))];
    series.extend(channels.iter().map(|&channel| {
        Series::new(channel.column_name(), table.points(channel, window.rows()))
    }));

    Figure {
        title: overlay_title("Time Domain", channels),
        x_label: TIME_AXIS_LABEL.to_string(),
        panels: vec![Panel {
            title: "Recorded Signal(s)".to_string(),
            y_label: table.unit().to_string(),
            y_range: None,
            series,
        }],
    }
}

/// Single panel of magnitude spectra on a zero baseline over `frequencies_hz`
pub fn frequency_overlay(frequencies_hz: &[f64], spectra: &[(Channel, Spectrum)]) -> Figure {
    let channels: Vec<Channel> = spectra.iter().map(|(c, _)| *c).collect();
    let mut series = vec![Series::baseline(frequencies_hz.iter().copied())];
    series.extend(
        spectra
            .iter()
            .map(|(channel, spectrum)| Series::new(channel.column_name(), spectrum.points())),
    );

    Figure {
        title: overlay_title("Frequency Domain", &channels),
        x_label: FREQUENCY_AXIS_LABEL.to_string(),
        panels: vec![Panel {
            title: "Amplitude".to_string(),
            y_label: "Amplitude".to_string(),
            y_range: None,
            series,
        }],
    }
}
