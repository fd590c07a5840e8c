//! Whole-figure and log-summary rendering for the one-shot commands.

use std::fmt::Write;

use serde::Serialize;

use super::OutputFormat;
use crate::analysis::{ChannelSummary, UnitMode, summarize};
use crate::chart::{Figure, Series};
use crate::telemetry::SampleTable;

/// Facts about a loaded log plus per-channel statistics
#[derive(Debug, Clone, Serialize)]
pub struct LogOverview {
    pub rows: usize,
    pub first_time_s: f64,
    pub last_time_s: f64,
    pub sample_period_s: f64,
    pub unit: UnitMode,
    pub channels: Vec<ChannelSummary>,
}

impl LogOverview {
    pub fn new(table: &SampleTable) -> Self {
        Self {
            rows: table.len(),
            first_time_s: table.first_time(),
            last_time_s: table.last_time(),
            sample_period_s: table.sample_period(),
            unit: table.unit(),
            channels: summarize(table),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
}

fn y_extent(series: &Series) -> Option<(f64, f64)> {
    series.points.iter().fold(None, |acc, p| match acc {
        None => Some((p[1], p[1])),
        Some((lo, hi)) => Some((lo.min(p[1]), hi.max(p[1]))),
    })
}

fn largest_point(series: &Series) -> Option<[f64; 2]> {
    series
        .points
        .iter()
        .copied()
        .max_by(|a, b| a[1].abs().total_cmp(&b[1].abs()))
}

fn figure_text(figure: &Figure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", figure.title);
    for panel in &figure.panels {
        let _ = writeln!(out, "  {} [{}]", panel.title, panel.y_label);
        if let Some([lo, hi]) = panel.y_range {
            let _ = writeln!(out, "    y range: {:.3} to {:.3}", lo, hi);
        }
        for series in &panel.series {
            let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
                let _ = writeln!(out, "    {:<28} (empty)", series.name);
                continue;
            };
            let _ = write!(
                out,
                "    {:<28} {:>6} pts  {} {:.3}..{:.3}",
                series.name,
                series.len(),
                figure.x_label,
                first[0],
                last[0]
            );
            if let Some((lo, hi)) = y_extent(series) {
                let _ = write!(out, "  y {:.4}..{:.4}", lo, hi);
            }
            if let Some([x, y]) = largest_point(series)
                && y != 0.0
            {
                let _ = write!(out, "  max |y| {:.4} at {:.3}", y.abs(), x);
            }
            out.push('\n');
        }
    }
    out
}

fn figure_csv(figure: &Figure) -> String {
    let mut out = String::from("panel,series,x,y\n");
    for panel in &figure.panels {
        for series in &panel.series {
            for [x, y] in &series.points {
                let _ = writeln!(out, "{},{},{},{}", panel.title, series.name, x, y);
            }
        }
    }
    out
}

pub fn render_figure(figure: &Figure, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => figure_text(figure),
        OutputFormat::Csv => figure_csv(figure),
        OutputFormat::Json => to_json(figure),
    }
}

pub fn render_summary(overview: &LogOverview, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(overview),
        OutputFormat::Csv => {
            let mut out = String::from("channel,count,mean,std_dev,min,max\n");
            for s in &overview.channels {
                let _ = writeln!(
                    out,
                    "{},{},{},{},{},{}",
                    s.channel, s.count, s.mean, s.std_dev, s.min, s.max
                );
            }
            out
        }
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "Rows: {}  time {:.3}..{:.3} s  period {:.4} s ({:.1} Hz)  unit: {}",
                overview.rows,
                overview.first_time_s,
                overview.last_time_s,
                overview.sample_period_s,
                1.0 / overview.sample_period_s,
                overview.unit
            );
            for s in &overview.channels {
                let _ = writeln!(
                    out,
                    "  {:<28} mean {:>10.4}  std {:>9.4}  min {:>10.4}  max {:>10.4}",
                    s.channel.column_name(),
                    s.mean,
                    s.std_dev,
                    s.min,
                    s.max
                );
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Panel;
    use crate::telemetry::{Channel, Sample};

    fn figure() -> Figure {
        Figure {
            title: "Frequency Domain [measuredRollRate_rps]".to_string(),
            x_label: "Frequency [Hz]".to_string(),
            panels: vec![Panel {
                title: "Amplitude".to_string(),
                y_label: "Amplitude".to_string(),
                y_range: None,
                series: vec![
                    Series::baseline([-1.0, 0.0, 1.0]),
                    Series::new(
                        "measuredRollRate_rps",
                        vec![[-1.0, 0.25], [0.0, 0.0], [1.0, 0.25]],
                    ),
                ],
            }],
        }
    }

    #[test]
    fn test_figure_csv_rows() {
        let csv = render_figure(&figure(), OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "panel,series,x,y");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[4], "Amplitude,measuredRollRate_rps,-1,0.25");
    }

    #[test]
    fn test_figure_text_mentions_series() {
        let text = render_figure(&figure(), OutputFormat::Text);
        assert!(text.starts_with("Frequency Domain"));
        assert!(text.contains("baseline"));
        assert!(text.contains("max |y| 0.2500 at 1.000"));
    }

    #[test]
    fn test_figure_json_round_trips_through_value() {
        let json = render_figure(&figure(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["panels"][0]["series"][1]["points"][2][1], 0.25);
    }

    #[test]
    fn test_summary_formats() {
        let samples = (0..=10)
            .map(|k| Sample {
                time_s: k as f64,
                roll_acceleration_command: k as f64,
                measured_roll_rate: 0.0,
                roll_attitude_command: 0.0,
                measured_roll_attitude: 0.0,
            })
            .collect();
        let table = SampleTable::new(samples).unwrap();
        let overview = LogOverview::new(&table);
        assert_eq!(overview.rows, 11);
        assert_eq!(overview.channels.len(), 4);

        let text = render_summary(&overview, OutputFormat::Text);
        assert!(text.starts_with("Rows: 11"));
        let csv = render_summary(&overview, OutputFormat::Csv);
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains(&format!("{},11,", Channel::RollAccelerationCommand)));
    }
}
