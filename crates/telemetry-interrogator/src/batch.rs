use chrono::{DateTime, Utc};
use lattice_guards::{GeometricTensionValidator, ValidationResult};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{TelemetryError, TelemetryResult};
use crate::record::{csv_reader, open_telemetry, TelemetryRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowOutcome {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub r_au: Option<f64>,
    /// Set when the baseline used the unscaled calibration magnitude.
    pub distance_fallback: bool,
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<RowOutcome>,
    pub stable: usize,
    pub stressed: usize,
    pub max_chi: f64,
}

impl BatchReport {
    pub fn has_stress(&self) -> bool {
        self.stressed > 0
    }

    /// Share of rows flagged as lattice stress; zero for an empty batch.
    pub fn stress_fraction(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.stressed as f64 / self.rows.len() as f64
    }
}

/// Classifies every row of a CSV telemetry table. Stops at the first
/// malformed row.
pub fn validate_reader<R: Read>(
    validator: &GeometricTensionValidator,
    reader: R,
) -> TelemetryResult<BatchReport> {
    let mut csv = csv_reader(reader);
    let mut rows = Vec::new();
    let mut stable = 0;
    let mut stressed = 0;
    let mut max_chi: f64 = 0.0;

    for (idx, record) in csv.deserialize::<TelemetryRow>().enumerate() {
        let row = idx + 1;
        let record = record?;
        let observation = record
            .observation()
            .ok_or(TelemetryError::MissingMagnitude { row })?;

        let distance_fallback = !matches!(record.r_au, Some(r) if r > 0.0);
        if distance_fallback {
            warn!(
                row,
                r_au = ?record.r_au,
                "distance missing or non-positive, using calibration magnitude"
            );
        }

        let result = validator
            .try_classify(&observation, record.r_au)
            .map_err(|source| TelemetryError::InvalidRow { row, source })?;

        if result.status.is_stable() {
            stable += 1;
        } else {
            stressed += 1;
        }
        max_chi = max_chi.max(result.chi);
        rows.push(RowOutcome {
            row,
            r_au: record.r_au,
            distance_fallback,
            result,
        });
    }

    info!(rows = rows.len(), stable, stressed, max_chi, "telemetry batch validated");
    Ok(BatchReport {
        generated_at: Utc::now(),
        rows,
        stable,
        stressed,
        max_chi,
    })
}

pub fn validate_file(
    validator: &GeometricTensionValidator,
    path: &Path,
) -> TelemetryResult<BatchReport> {
    let file = open_telemetry(path)?;
    validate_reader(validator, file)
}
