//! Aggregate audit of a precomputed `chi_amplitude` column.

use chrono::{DateTime, Utc};
use plasma_core::{InterrogationConfig, LatticeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{TelemetryError, TelemetryResult};
use crate::record::{csv_reader, open_telemetry, ChiRow};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Peak chi within the plasma limit.
    Nominal,
    /// Peak chi above the limit but under the harmonic ceiling.
    HarmonicEvent,
    /// Peak chi beyond the harmonic ceiling.
    Anomaly,
}

impl Verdict {
    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Nominal => "LOGIC CONFIRMED (Nominal)",
            Verdict::HarmonicEvent => "LOGIC CONFIRMED (Mode 6 Harmonic Event)",
            Verdict::Anomaly => "ANOMALY DETECTED (Data requires manual audit)",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Where the standard correlation figure came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationSource {
    Measured,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterrogationReport {
    pub generated_at: DateTime<Utc>,
    pub observations: usize,
    pub violations: usize,
    pub max_chi: f64,
    pub standard_correlation: f64,
    pub correlation_source: CorrelationSource,
    pub imperial_correlation: f64,
    pub verdict: Verdict,
}

/// Pearson correlation over paired samples. `None` with fewer than two
/// pairs or when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    // Rounding can push a perfect fit a few ulps past the unit interval.
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Adherence score to the plasma limit: the perfect score when nothing
/// exceeds it, otherwise `1 - mean_excess * penalty_weight` held at or above
/// the floor.
pub fn imperial_correlation(chis: &[f64], cfg: &InterrogationConfig) -> f64 {
    let violating: Vec<f64> = chis.iter().copied().filter(|c| *c > cfg.limit).collect();
    if violating.is_empty() {
        return cfg.perfect_score;
    }
    let mean = violating.iter().sum::<f64>() / violating.len() as f64;
    let deviation = mean - cfg.limit;
    (1.0 - deviation * cfg.penalty_weight).max(cfg.score_floor)
}

pub fn verdict_for(max_chi: f64, cfg: &InterrogationConfig) -> Verdict {
    if max_chi <= cfg.limit {
        Verdict::Nominal
    } else if max_chi <= cfg.harmonic_ceiling {
        Verdict::HarmonicEvent
    } else {
        Verdict::Anomaly
    }
}

fn ensure_finite(row: usize, field: &'static str, value: f64) -> TelemetryResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TelemetryError::InvalidRow {
            row,
            source: LatticeError::NonFinite { field, value },
        })
    }
}

pub fn interrogate_reader<R: Read>(
    cfg: &InterrogationConfig,
    reader: R,
) -> TelemetryResult<InterrogationReport> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    if !headers.iter().any(|h| h == "chi_amplitude") {
        return Err(TelemetryError::MissingColumn("chi_amplitude"));
    }
    let has_bt = headers.iter().any(|h| h == "bt_nT");

    let mut chis = Vec::new();
    let mut paired_chi = Vec::new();
    let mut paired_bt = Vec::new();
    for (idx, record) in csv.deserialize::<ChiRow>().enumerate() {
        let row = idx + 1;
        let record = record?;
        let chi = ensure_finite(row, "chi_amplitude", record.chi_amplitude)?;
        chis.push(chi);
        if let Some(bt) = record.bt_nt {
            paired_chi.push(chi);
            paired_bt.push(ensure_finite(row, "bt_nT", bt)?);
        }
    }
    if chis.is_empty() {
        return Err(TelemetryError::Empty);
    }

    let max_chi = chis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let violations = chis.iter().filter(|c| **c > cfg.limit).count();
    let measured = if has_bt {
        pearson(&paired_chi, &paired_bt)
    } else {
        None
    };
    let (standard_correlation, correlation_source) = match measured {
        Some(r) => (r, CorrelationSource::Measured),
        None => (cfg.pearson_fallback, CorrelationSource::Fallback),
    };
    let imperial = imperial_correlation(&chis, cfg);
    let verdict = verdict_for(max_chi, cfg);

    info!(
        observations = chis.len(),
        violations,
        max_chi,
        standard_correlation,
        imperial_correlation = imperial,
        ?verdict,
        "telemetry interrogated"
    );

    Ok(InterrogationReport {
        generated_at: Utc::now(),
        observations: chis.len(),
        violations,
        max_chi,
        standard_correlation,
        correlation_source,
        imperial_correlation: imperial,
        verdict,
    })
}

pub fn interrogate_file(
    cfg: &InterrogationConfig,
    path: &Path,
) -> TelemetryResult<InterrogationReport> {
    let file = open_telemetry(path)?;
    interrogate_reader(cfg, file)
}
