pub mod generate;

pub use generate::{constant_log, sinusoid_log, sweep_csv};
