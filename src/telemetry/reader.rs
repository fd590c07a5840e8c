use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};

use super::{Channel, Sample, SampleTable};
use crate::constants::TIME_COLUMN;
use crate::error::{Result, SweepError};

/// Load a radian-native roll sweep log from a CSV file
pub fn load_log<P: AsRef<Path>>(path: P) -> Result<SampleTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_log(file)?;
    log::info!(
        "Loaded {} rows from {} ({:.3} s to {:.3} s, period {:.4} s)",
        table.len(),
        path.display(),
        table.first_time(),
        table.last_time(),
        table.sample_period()
    );
    Ok(table)
}

/// Parse a roll sweep log from any CSV source
///
/// The header must contain the time column and all four signal columns;
/// additional columns are ignored.
pub fn read_log<R: Read>(source: R) -> Result<SampleTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    log::debug!("CSV headers: {:?}", headers);

    let required = std::iter::once(TIME_COLUMN).chain(Channel::ALL.iter().map(|c| c.column_name()));
    for name in required {
        if !headers.iter().any(|h| h == name) {
            return Err(SweepError::MissingColumn(name.to_string()));
        }
    }

    let samples = reader
        .deserialize::<Sample>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    SampleTable::new(samples)
}

/// Write samples as CSV with the standard header
pub fn write_log<W: Write>(sink: W, samples: &[Sample]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(sink);
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write samples to a CSV file
pub fn save_log<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_log(file, samples)
}
