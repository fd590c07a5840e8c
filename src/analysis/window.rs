use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{Result, SweepError};
use crate::telemetry::{Sample, SampleTable};

/// Inclusive row-index range of the visible part of a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayWindow {
    pub lo: usize,
    pub hi: usize,
}

impl DisplayWindow {
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi);
        Self { lo, hi }
    }

    /// Number of rows covered
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    pub fn is_empty(&self) -> bool {
        self.hi < self.lo
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.lo..=self.hi
    }
}

/// Find the row whose time equals `time_s` exactly
///
/// No interpolation: a time between rows is `TimeNotFound`. More than one
/// matching row is reported as `AmbiguousTimestamp` even though a validated
/// table cannot contain duplicates.
pub fn locate(table: &SampleTable, time_s: f64) -> Result<usize> {
    locate_in(table.samples(), time_s)
}

fn locate_in(samples: &[Sample], time_s: f64) -> Result<usize> {
    let start = samples.partition_point(|s| s.time_s < time_s);
    let count = samples[start..]
        .iter()
        .take_while(|s| s.time_s == time_s)
        .count();

    match count {
        0 => Err(SweepError::TimeNotFound(time_s)),
        1 => Ok(start),
        _ => Err(SweepError::AmbiguousTimestamp {
            time: time_s,
            count,
        }),
    }
}

/// Trailing window of `history_s` seconds ending at `index`
///
/// While the elapsed time at `index` is within the history length the window
/// starts at row 0; afterwards it keeps a fixed wall-clock span. The window
/// never extends past `index`.
pub fn trailing_window(index: usize, history_s: f64, sample_period: f64) -> DisplayWindow {
    let elapsed = index as f64 * sample_period;
    if elapsed <= history_s {
        return DisplayWindow::new(0, index);
    }
    let history_rows = (history_s / sample_period).round() as usize;
    DisplayWindow::new(index.saturating_sub(history_rows), index)
}

/// Window from `index` through the last row of a log of `len` rows
///
/// An index past the end clamps to the last row.
pub fn forward_window(index: usize, len: usize) -> Result<DisplayWindow> {
    if len == 0 {
        return Err(SweepError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    let last = len - 1;
    Ok(DisplayWindow::new(index.min(last), last))
}
