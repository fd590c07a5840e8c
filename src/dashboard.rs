use serde::Serialize;

use crate::analysis::{
    DisplayWindow, SpectrumEstimator, UnitMode, convert, fft_frequencies, fft_shift,
    forward_window, locate,
};
use crate::chart::{Figure, frequency_overlay, playback_figure, strip_figure, time_overlay};
use crate::config::DashboardConfig;
use crate::constants::DEFAULT_TAIL_S;
use crate::error::{Result, SweepError};
use crate::playback::PlaybackFrame;
use crate::telemetry::{Channel, SampleTable};

/// Post-processing view inputs
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessRequest {
    pub unit: UnitMode,
    /// Must equal the time of a row in the log
    pub start_time_s: f64,
    pub channels: Vec<Channel>,
}

/// Everything the post-processing view draws for one request
#[derive(Debug, Clone, Serialize)]
pub struct PostProcessFigures {
    pub window: DisplayWindow,
    pub strip: Figure,
    pub time: Figure,
    pub frequency: Figure,
}

/// Maps control state to figures over one loaded log
///
/// The source table is never modified. A converted copy is kept for the last
/// requested unit so repeated ticks in the same unit do not reconvert.
pub struct SweepDashboard<'a> {
    source: &'a SampleTable,
    view: SampleTable,
    estimator: SpectrumEstimator,
}

impl<'a> SweepDashboard<'a> {
    pub fn new(source: &'a SampleTable) -> Self {
        Self {
            source,
            view: source.clone(),
            estimator: SpectrumEstimator::new(),
        }
    }

    pub fn table(&self) -> &SampleTable {
        self.source
    }

    fn ensure_unit(&mut self, unit: UnitMode) {
        if self.view.unit() != unit {
            log::debug!("Converting log to {}", unit);
            self.view = convert(self.source, unit);
        }
    }

    /// Stacked playback panels for a driver frame
    pub fn playback_view(&mut self, frame: &PlaybackFrame, unit: UnitMode) -> Figure {
        self.ensure_unit(unit);
        playback_figure(&self.view, frame.window)
    }

    /// Strip chart plus time and frequency overlays from the start time to the end
    pub fn post_process(&mut self, request: &PostProcessRequest) -> Result<PostProcessFigures> {
        self.ensure_unit(request.unit);

        let index = locate(&self.view, request.start_time_s)?;
        let window = forward_window(index, self.view.len())?;
        log::debug!(
            "Post-processing from {} s: rows {}..={}, {} channel(s)",
            request.start_time_s,
            window.lo,
            window.hi,
            request.channels.len()
        );

        let spectra = self
            .estimator
            .channel_spectra(&self.view, &request.channels, window);
        let frequencies = fft_shift(&fft_frequencies(window.len(), self.view.sample_period()));

        Ok(PostProcessFigures {
            window,
            strip: strip_figure(&self.view, window),
            time: time_overlay(&self.view, window, &request.channels),
            frequency: frequency_overlay(&frequencies, &spectra),
        })
    }

    /// Selectable start times from the first to the last row, `step_s` apart
    ///
    /// Each position is snapped to the time of its nearest row so it can be
    /// passed straight to [`SweepDashboard::post_process`].
    pub fn slider_positions(&self, step_s: f64) -> Vec<f64> {
        slider_positions(self.source, step_s)
    }

    /// Last slider position at or before 30 s from the end of the log
    pub fn default_start_time(&self) -> f64 {
        default_start_time(self.source)
    }

    /// Request built from config, falling back to the default start time
    pub fn request_from_config(&self, config: &DashboardConfig) -> Result<PostProcessRequest> {
        let post = &config.post_process;
        let start_time_s = match post.start_time_s {
            Some(t) => t,
            None => self.default_start_time(),
        };
        if start_time_s < self.source.first_time() || start_time_s > self.source.last_time() {
            return Err(SweepError::TimeNotFound(start_time_s));
        }
        Ok(PostProcessRequest {
            unit: config.display.unit,
            start_time_s,
            channels: post.channels.clone(),
        })
    }
}

fn nearest_row_time(table: &SampleTable, time_s: f64) -> f64 {
    let offset = ((time_s - table.first_time()) / table.sample_period()).round();
    let index = (offset.max(0.0) as usize).min(table.last_index());
    table.samples()[index].time_s
}

pub fn slider_positions(table: &SampleTable, step_s: f64) -> Vec<f64> {
    if step_s.is_nan() || step_s <= 0.0 {
        return vec![table.first_time()];
    }
    let first = table.first_time();
    let span = table.last_time() - first;
    let count = (span / step_s + 1e-9).floor() as usize;
    (0..=count)
        .map(|k| nearest_row_time(table, first + k as f64 * step_s))
        .collect()
}

/// Row nearest to 30 s before the end of the log, or the first row of a shorter log
pub fn default_start_time(table: &SampleTable) -> f64 {
    let target = (table.last_time() - DEFAULT_TAIL_S).max(table.first_time());
    nearest_row_time(table, target)
}
