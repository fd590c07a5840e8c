mod sweep;

pub use sweep::{SweepConfig, generate_sweep};
