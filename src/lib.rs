pub mod analysis;
pub mod chart;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod playback;
pub mod telemetry;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use analysis::UnitMode;
pub use config::DashboardConfig;
pub use dashboard::{PostProcessFigures, PostProcessRequest, SweepDashboard};
pub use error::{Result, SweepError};
pub use playback::{PlaybackDriver, PlaybackFrame};
pub use telemetry::{Channel, Sample, SampleTable, load_log, save_log};
