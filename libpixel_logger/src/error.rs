use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColumnParseError {
    #[error("Column parser failed to read {path:?} due to IO error: {source}")]
    IOError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Column parser found a row with the wrong number of fields in {path:?} at line {line} -- expected {expected}, found {found}")]
    ShapeMismatch {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Column parser could not read {value:?} in {path:?} (line {line}, column {column}) as an integer: {source}")]
    FormatError {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Error)]
pub enum PixelMapError {
    #[error("PixelMap requires exactly 2 columns (pixel, value) but {path:?} has {found}")]
    ShapeMismatch { path: PathBuf, found: usize },
    #[error("PixelMap was given a mapping with no data rows in {0:?}")]
    NoDataRows(PathBuf),
    #[error("PixelMap failed due to column parser error: {0}")]
    ParseError(#[from] ColumnParseError),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Frame declared {declared} pixels but carried {found} counts")]
    InconsistentPixelCount { declared: usize, found: usize },
    #[error("Frame source reported a failed capture with status {0}")]
    BadStatus(u8),
    #[error("Frame source has no more frames to capture")]
    Exhausted,
    #[error("Could not open frame source because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Frame source failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DatalogError {
    #[error("Datalog {path:?} failed due to IO error: {source}")]
    IOError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session failed while capturing frame {frame}: {source}")]
    ProviderError { frame: usize, source: ProviderError },
    #[error("Session failed while logging frame {frame}: {source}")]
    DatalogError { frame: usize, source: DatalogError },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
    #[error("Config requested {0} frames; at least 1 is required")]
    BadFrameCount(usize),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to column parser error: {0}")]
    ParseError(#[from] ColumnParseError),
    #[error("Processor failed due to PixelMap error: {0}")]
    MapError(#[from] PixelMapError),
    #[error("Processor failed due to frame source error: {0}")]
    ProviderError(#[from] ProviderError),
    #[error("Processor failed due to Datalog error: {0}")]
    DatalogError(#[from] DatalogError),
    #[error("Processor failed due to Session error: {0}")]
    SessionError(#[from] SessionError),
}
