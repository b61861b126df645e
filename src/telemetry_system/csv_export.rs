use std::fs;
use std::io::Write;
use std::path::Path;

use super::telemetry::{Telemetry, TelemetryRecord};
use crate::errors::SimulationResult;

/// Writes a header row then one row per record, in telemetry column order.
pub fn write_records<W: Write>(
    writer: W,
    columns: &[String],
    records: &[TelemetryRecord],
) -> SimulationResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns)?;
    for record in records {
        csv_writer.write_record(record.values().iter().map(|value| value.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the telemetry to `path`, creating parent directories as needed.
pub fn write_csv_file(path: impl AsRef<Path>, telemetry: &Telemetry) -> SimulationResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    write_records(file, &telemetry.columns, &telemetry.records)
}
