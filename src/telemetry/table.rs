use std::ops::RangeInclusive;

use super::{Channel, Sample};
use crate::analysis::UnitMode;
use crate::constants::SPACING_TOLERANCE;
use crate::error::{Result, SweepError};

/// Immutable, validated sequence of log samples
///
/// Construction checks that time is strictly increasing and sampled on a fixed
/// cadence; the sample period is derived from the data rather than assumed.
/// Unit conversion never mutates a table, it builds a new one.
#[derive(Debug, Clone)]
pub struct SampleTable {
    samples: Vec<Sample>,
    unit: UnitMode,
    sample_period: f64,
}

impl SampleTable {
    /// Build a table from radian-native samples
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        Self::with_unit(samples, UnitMode::Radians)
    }

    /// Build a table whose angle columns are already expressed in `unit`
    pub fn with_unit(samples: Vec<Sample>, unit: UnitMode) -> Result<Self> {
        if samples.len() < 2 {
            return Err(SweepError::InsufficientData {
                needed: 2,
                available: samples.len(),
            });
        }

        if let Some(row) = samples.iter().position(|s| !s.time_s.is_finite()) {
            return Err(SweepError::NonFiniteTime {
                row,
                value: samples[row].time_s,
            });
        }

        for (row, pair) in samples.windows(2).enumerate() {
            if pair[1].time_s <= pair[0].time_s {
                return Err(SweepError::NonMonotonicTime {
                    row: row + 1,
                    previous: pair[0].time_s,
                    current: pair[1].time_s,
                });
            }
        }

        let first = samples[0].time_s;
        let last = samples[samples.len() - 1].time_s;
        let sample_period = (last - first) / (samples.len() - 1) as f64;

        let tolerance = sample_period * SPACING_TOLERANCE;
        for (row, pair) in samples.windows(2).enumerate() {
            let spacing = pair[1].time_s - pair[0].time_s;
            if (spacing - sample_period).abs() > tolerance {
                return Err(SweepError::IrregularSampling {
                    row: row + 1,
                    spacing,
                    expected: sample_period,
                });
            }
        }

        Ok(Self {
            samples,
            unit,
            sample_period,
        })
    }

    /// Rebuild with transformed samples, keeping the already validated time axis.
    pub(crate) fn derived(&self, samples: Vec<Sample>, unit: UnitMode) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            samples,
            unit,
            sample_period: self.sample_period,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn unit(&self) -> UnitMode {
        self.unit
    }

    /// Seconds between consecutive rows
    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    pub fn first_time(&self) -> f64 {
        self.samples[0].time_s
    }

    pub fn last_time(&self) -> f64 {
        self.samples[self.samples.len() - 1].time_s
    }

    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    /// Time values for a row range, clamped to the table
    pub fn times(&self, rows: RangeInclusive<usize>) -> Vec<f64> {
        self.rows(rows).iter().map(|s| s.time_s).collect()
    }

    /// Channel values for a row range, clamped to the table
    pub fn column(&self, channel: Channel, rows: RangeInclusive<usize>) -> Vec<f64> {
        self.rows(rows).iter().map(|s| s.get(channel)).collect()
    }

    /// `[time, value]` pairs for a row range, clamped to the table
    pub fn points(&self, channel: Channel, rows: RangeInclusive<usize>) -> Vec<[f64; 2]> {
        self.rows(rows)
            .iter()
            .map(|s| [s.time_s, s.get(channel)])
            .collect()
    }

    fn rows(&self, rows: RangeInclusive<usize>) -> &[Sample] {
        let (start, end) = rows.into_inner();
        if start > end || start >= self.samples.len() {
            return &[];
        }
        let end = end.min(self.samples.len() - 1);
        &self.samples[start..=end]
    }
}
