use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV log: {0}")]
    Csv(#[from] csv::Error),

    #[error("Log is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Non-finite time {value} at row {row}")]
    NonFiniteTime { row: usize, value: f64 },

    #[error("Time not strictly increasing at row {row}: {previous} s followed by {current} s")]
    NonMonotonicTime {
        row: usize,
        previous: f64,
        current: f64,
    },

    #[error("Irregular sample spacing at row {row}: {spacing:.6} s, expected {expected:.6} s")]
    IrregularSampling {
        row: usize,
        spacing: f64,
        expected: f64,
    },

    #[error("Time {0} s not found in log")]
    TimeNotFound(f64),

    #[error("Ambiguous timestamp {time} s matches {count} rows")]
    AmbiguousTimestamp { time: f64, count: usize },

    #[error("Tick period incompatible with log cadence: {0}")]
    IncompatibleCadence(String),

    #[error("Unknown signal column '{0}'")]
    UnknownChannel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;
