use serde::Serialize;

use crate::analysis::{DisplayWindow, locate, trailing_window};
use crate::config::PlaybackConfig;
use crate::constants::MILLISECOND_TOLERANCE;
use crate::error::{Result, SweepError};
use crate::telemetry::SampleTable;

/// Whether the driver still advances with the tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    Running,
    /// The next tick would pass the end of the log; the last frame is held
    Halted,
}

/// Everything a view needs to draw one playback tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackFrame {
    pub tick: u64,
    pub cursor_s: u64,
    pub index: usize,
    pub window: DisplayWindow,
}

/// Elapsed whole seconds after `tick` ticks of `tick_period_ms`
pub fn cursor_for_tick(tick: u64, tick_period_ms: u32) -> u64 {
    tick * tick_period_ms as u64 / 1000
}

/// Last tick of `tick_period_ms` whose cursor does not pass `cursor_s`
///
/// Used to carry a replay position across a tick period change.
pub fn tick_for_cursor(cursor_s: u64, tick_period_ms: u32) -> u64 {
    cursor_s * 1000 / tick_period_ms.max(1) as u64
}

/// Replays a recorded log against an external tick counter
///
/// The cursor only lands on whole seconds, so the log must carry a row at
/// every whole second from zero. That coupling is checked once in
/// [`PlaybackDriver::new`] instead of failing halfway through a replay.
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    tick_period_ms: u32,
    history_s: f64,
    sample_period: f64,
    max_time_s: f64,
    state: PlaybackState,
    last_frame: Option<PlaybackFrame>,
}

impl PlaybackDriver {
    pub fn new(table: &SampleTable, config: &PlaybackConfig) -> Result<Self> {
        config.validate()?;
        if let Err(e) = check_cadence(table, config.tick_period_ms) {
            log::warn!("Rejecting tick period {} ms: {}", config.tick_period_ms, e);
            return Err(e);
        }

        log::debug!(
            "Playback: tick {} ms, history {} s, log ends at {} s",
            config.tick_period_ms,
            config.history_seconds,
            table.last_time()
        );

        Ok(Self {
            tick_period_ms: config.tick_period_ms,
            history_s: config.history_seconds as f64,
            sample_period: table.sample_period(),
            max_time_s: table.last_time(),
            state: PlaybackState::Running,
            last_frame: None,
        })
    }

    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }

    pub fn history_seconds(&self) -> f64 {
        self.history_s
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == PlaybackState::Halted
    }

    pub fn last_frame(&self) -> Option<&PlaybackFrame> {
        self.last_frame.as_ref()
    }

    pub fn cursor(&self, tick: u64) -> u64 {
        cursor_for_tick(tick, self.tick_period_ms)
    }

    /// True when the tick after `tick` would land past the end of the log
    pub fn should_stop(&self, tick: u64) -> bool {
        cursor_for_tick(tick + 1, self.tick_period_ms) as f64 > self.max_time_s
    }

    /// Produce the frame for tick `tick`
    ///
    /// Once halted, every call returns the held frame. A cursor with no exact
    /// row in the log is an error.
    pub fn tick(&mut self, table: &SampleTable, tick: u64) -> Result<PlaybackFrame> {
        if self.state == PlaybackState::Halted
            && let Some(frame) = self.last_frame
        {
            return Ok(frame);
        }

        let cursor_s = self.cursor(tick);
        let index = locate(table, cursor_s as f64)?;
        let window = trailing_window(index, self.history_s, self.sample_period);
        let frame = PlaybackFrame {
            tick,
            cursor_s,
            index,
            window,
        };
        self.last_frame = Some(frame);

        if self.should_stop(tick) {
            log::info!("Playback reached end of log at {} s (tick {})", cursor_s, tick);
            self.state = PlaybackState::Halted;
        }

        Ok(frame)
    }

    /// Return to the start of the log
    pub fn restart(&mut self) {
        self.state = PlaybackState::Running;
        self.last_frame = None;
    }
}

/// Check that every cursor a tick period can produce has a row
fn check_cadence(table: &SampleTable, tick_period_ms: u32) -> Result<()> {
    let period_ms = table.sample_period() * 1000.0;
    let native_ms = period_ms.round();
    if !period_ms.is_finite()
        || native_ms < 1.0
        || (period_ms - native_ms).abs() > MILLISECOND_TOLERANCE * native_ms
    {
        return Err(SweepError::IncompatibleCadence(format!(
            "log sample period {:.6} s is not a whole number of milliseconds",
            table.sample_period()
        )));
    }
    let native_ms = native_ms as u32;

    if 1000 % native_ms != 0 {
        return Err(SweepError::IncompatibleCadence(format!(
            "log sample period {} ms does not divide one second",
            native_ms
        )));
    }

    if tick_period_ms % native_ms != 0 {
        return Err(SweepError::IncompatibleCadence(format!(
            "tick period {} ms is not a multiple of the {} ms log period",
            tick_period_ms, native_ms
        )));
    }

    if locate(table, 0.0).is_err() {
        return Err(SweepError::IncompatibleCadence(format!(
            "log starts at {} s and has no row at 0 s",
            table.first_time()
        )));
    }

    // Cursors are whole seconds from 0 through the end of the log
    let last_second = table.last_time().floor() as u64;
    for second in 1..=last_second {
        if locate(table, second as f64).is_err() {
            return Err(SweepError::IncompatibleCadence(format!(
                "log has no row at {} s",
                second
            )));
        }
    }

    Ok(())
}
