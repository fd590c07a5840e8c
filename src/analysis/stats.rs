use rolling_stats::Stats;
use serde::Serialize;

use crate::telemetry::{Channel, SampleTable};

/// Summary statistics of one channel over a whole table
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub channel: Channel,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ChannelSummary {
    fn from_stats(channel: Channel, stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            channel,
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Per-channel statistics, in the unit the table is expressed in
pub fn summarize(table: &SampleTable) -> Vec<ChannelSummary> {
    Channel::ALL
        .iter()
        .filter_map(|&channel| {
            let mut stats: Stats<f64> = Stats::new();
            for sample in table.samples() {
                stats.update(sample.get(channel));
            }
            ChannelSummary::from_stats(channel, &stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Sample;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarize() {
        let samples = (0..5)
            .map(|k| Sample {
                time_s: k as f64,
                roll_acceleration_command: k as f64,
                measured_roll_rate: 1.0,
                roll_attitude_command: -(k as f64),
                measured_roll_attitude: 0.0,
            })
            .collect();
        let table = SampleTable::new(samples).unwrap();
        let summaries = summarize(&table);

        assert_eq!(summaries.len(), 4);
        let accel = &summaries[0];
        assert_eq!(accel.channel, Channel::RollAccelerationCommand);
        assert_eq!(accel.count, 5);
        assert_relative_eq!(accel.mean, 2.0, epsilon = 1e-12);
        assert_eq!(accel.min, 0.0);
        assert_eq!(accel.max, 4.0);

        let rate = &summaries[1];
        assert_relative_eq!(rate.std_dev, 0.0, epsilon = 1e-12);

        let cmd = &summaries[2];
        assert_eq!(cmd.min, -4.0);
        assert_eq!(cmd.max, 0.0);
    }
}
