use plasma_core::LatticeError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while ingesting a telemetry table.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry file missing at '{}'", .0.display())]
    MissingFile(PathBuf),
    #[error("i/o error reading telemetry: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt telemetry stream: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{0}' missing from telemetry")]
    MissingColumn(&'static str),
    #[error("row {row}: no magnitude, need bx_nT/by_nT/bz_nT or bt_nT")]
    MissingMagnitude { row: usize },
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: LatticeError,
    },
    #[error("telemetry contains no observations")]
    Empty,
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
