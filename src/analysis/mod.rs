pub mod spectrum;
pub mod stats;
pub mod units;
pub mod window;

pub use spectrum::{Spectrum, SpectrumEstimator, fft_frequencies, fft_shift};
pub use stats::{ChannelSummary, summarize};
pub use units::{UnitMode, convert};
pub use window::{DisplayWindow, forward_window, locate, trailing_window};
