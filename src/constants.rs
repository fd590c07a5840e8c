//! Column names, control limits and numeric tolerances
//!
//! Control limits mirror the dashboard widgets: the tick period and history
//! selectors are stepped, and the post-processing time slider moves in whole
//! steps from the start of the log.

/// Time axis column name in the CSV log.
pub const TIME_COLUMN: &str = "time_s";

/// Smallest selectable tick period in milliseconds.
pub const TICK_PERIOD_MIN_MS: u32 = 100;

/// Largest selectable tick period in milliseconds.
pub const TICK_PERIOD_MAX_MS: u32 = 200_000;

/// Tick period selector step in milliseconds.
pub const TICK_PERIOD_STEP_MS: u32 = 100;

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_PERIOD_MS: u32 = 1000;

/// Largest selectable history window in seconds.
pub const HISTORY_MAX_S: u32 = 200;

/// History selector step in seconds.
pub const HISTORY_STEP_S: u32 = 5;

/// Default history window in seconds.
pub const DEFAULT_HISTORY_S: u32 = 30;

/// Default post-processing slider step in seconds.
pub const DEFAULT_SLIDER_STEP_S: f64 = 20.0;

/// How far before the end of the log the post-processing view starts by default.
pub const DEFAULT_TAIL_S: f64 = 30.0;

/// Allowed deviation of a single sample spacing from the mean spacing,
/// as a fraction of the mean.
pub const SPACING_TOLERANCE: f64 = 0.01;

/// Tolerance when checking that the sample period is a whole number of milliseconds.
pub const MILLISECOND_TOLERANCE: f64 = 1e-6;
