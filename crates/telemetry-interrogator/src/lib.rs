//! Table-driven callers over the geometric tension validator: per-row batch
//! validation of field telemetry and aggregate interrogation of a chi
//! column.

pub mod batch;
pub mod error;
pub mod interrogation;
pub mod record;

pub use batch::{validate_file, validate_reader, BatchReport, RowOutcome};
pub use error::{TelemetryError, TelemetryResult};
pub use interrogation::{
    imperial_correlation, interrogate_file, interrogate_reader, pearson, verdict_for,
    CorrelationSource, InterrogationReport, Verdict,
};
pub use record::{open_telemetry, ChiRow, TelemetryRow};
