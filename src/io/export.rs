//! CSV export for decision reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::DecisionReport;

/// Column header for the device decision export.
const HEADER: &str = "device,on,shed";

/// Exports the device decisions of `report` to a CSV file at the given path.
///
/// Writes a header row followed by one row per device in name order.
/// Produces deterministic output for identical reports.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &DecisionReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes the device decisions of `report` as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &DecisionReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (device, on) in report.device_status.iter() {
        let shed = report.shed_devices.iter().any(|d| d == device);
        let (on, shed) = (on.to_string(), shed.to_string());
        wtr.write_record([device, on.as_str(), shed.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
