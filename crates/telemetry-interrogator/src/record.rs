use plasma_core::Observation;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{TelemetryError, TelemetryResult};

/// One row of a field telemetry table. Unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TelemetryRow {
    #[serde(default)]
    pub r_au: Option<f64>,
    #[serde(default, rename = "bx_nT")]
    pub bx_nt: Option<f64>,
    #[serde(default, rename = "by_nT")]
    pub by_nt: Option<f64>,
    #[serde(default, rename = "bz_nT")]
    pub bz_nt: Option<f64>,
    #[serde(default, rename = "bt_nT")]
    pub bt_nt: Option<f64>,
}

impl TelemetryRow {
    /// The full vector when all three components are present, otherwise the
    /// scalar magnitude.
    pub fn observation(&self) -> Option<Observation> {
        match (self.bx_nt, self.by_nt, self.bz_nt) {
            (Some(x), Some(y), Some(z)) => Some(Observation::Vector([x, y, z])),
            _ => self.bt_nt.map(Observation::Scalar),
        }
    }
}

/// One row of a precomputed chi table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChiRow {
    pub chi_amplitude: f64,
    #[serde(default, rename = "bt_nT")]
    pub bt_nt: Option<f64>,
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader)
}

/// Opens a telemetry file, separating "not there" from other I/O failures.
pub fn open_telemetry(path: &Path) -> TelemetryResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TelemetryError::MissingFile(path.to_path_buf()),
        _ => TelemetryError::Io(e),
    })
}
