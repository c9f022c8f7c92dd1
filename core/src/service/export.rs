use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::log_entry::LogEntry;

pub const CSV_HEADER: [&str; 5] = ["Date", "Availability", "Performance", "Quality", "OEE"];

// One CSV line. Ratios are written as percentages with two decimals.
#[derive(Serialize)]
struct CsvRow {
    date: String,
    availability: String,
    performance: String,
    quality: String,
    oee: String,
}

impl From<&LogEntry> for CsvRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            availability: percent(entry.availability),
            performance: percent(entry.performance),
            quality: percent(entry.quality),
            oee: percent(entry.oee),
        }
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}", ratio * 100.0)
}

/// Writes the header followed by one row per entry, in the given order.
pub fn write_csv<W: Write>(writer: W, entries: &[LogEntry]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for entry in entries {
        wtr.serialize(CsvRow::from(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(entries: &[LogEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, entries)?;
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn write_csv_file(path: &Path, entries: &[LogEntry]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), entries)
}
