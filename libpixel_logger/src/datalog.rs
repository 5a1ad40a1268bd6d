use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::error::DatalogError;
use super::frame::Frame;
use super::pixel_map::{PixelMap, ValidRange};

const DATALOG_DELIMITER: &str = ",";

/// Join values into one complete datalog line, terminator included
fn format_line<T: Display>(values: &[T]) -> String {
    let mut line = values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(DATALOG_DELIMITER);
    line.push('\n');
    line
}

fn io_error(path: &Path, source: std::io::Error) -> DatalogError {
    DatalogError::IOError {
        path: path.to_path_buf(),
        source,
    }
}

/// Start a new datalog, writing the header of mapped values for the valid range.
///
/// Any existing file at the path is truncated. Returns the number of header fields.
pub fn write_header(
    log_path: &Path,
    map: &PixelMap,
    range: &ValidRange,
) -> Result<usize, DatalogError> {
    let values = map.values_in_range(range);
    let line = format_line(&values);
    let mut file = File::create(log_path).map_err(|e| io_error(log_path, e))?;
    file.write_all(line.as_bytes()).map_err(|e| io_error(log_path, e))?;
    log::debug!(
        "Wrote datalog header with {} fields to {}",
        values.len(),
        log_path.to_string_lossy()
    );
    Ok(values.len())
}

/// Append a frame's in-range counts to the datalog as a single line.
///
/// The line is fully formatted before the file is opened and is written with one call, so a
/// failure never leaves half a row from this frame behind. The file is created if it does
/// not exist. Returns the number of fields written; this is short by
/// [`ValidRange::missing_pixels`] when the frame does not reach the end of the range.
pub fn log_frame(log_path: &Path, frame: &Frame, range: &ValidRange) -> Result<usize, DatalogError> {
    let counts = frame.counts_in_range(range);
    let line = format_line(&counts);
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_path)
        .map_err(|e| io_error(log_path, e))?;
    file.write_all(line.as_bytes()).map_err(|e| io_error(log_path, e))?;
    Ok(counts.len())
}
