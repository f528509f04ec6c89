use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::CalibrationPoint;
use crate::constants::{CHI_LIMIT, CHI_TOLERANCE};
use crate::error::{LatticeError, LatticeResult};

fn ensure_finite_non_negative(name: &str, value: f64) -> LatticeResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LatticeError::Config(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

/// Settings for the geometric tension validator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Plasma limit χ. Default: 0.15.
    pub limit: f64,
    /// Noise floor added to `limit` before flagging. Default: 0.01.
    pub tolerance: f64,
    /// Default: 5.0 nT at 1.0 AU.
    pub calibration: CalibrationPoint,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            limit: CHI_LIMIT,
            tolerance: CHI_TOLERANCE,
            calibration: CalibrationPoint::default(),
        }
    }
}

impl ValidatorConfig {
    /// Highest chi still classified as stable (inclusive).
    pub fn stability_threshold(&self) -> f64 {
        self.limit + self.tolerance
    }

    pub fn validate(&self) -> LatticeResult<()> {
        ensure_finite_non_negative("limit", self.limit)?;
        ensure_finite_non_negative("tolerance", self.tolerance)?;
        self.calibration.validate()
    }
}

/// Settings for aggregate chi-amplitude interrogation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterrogationConfig {
    /// Chi above this counts as a violation. Default: 0.15.
    pub limit: f64,
    /// Multiplier on the mean excess over `limit`. Default: 10.0.
    pub penalty_weight: f64,
    /// Lowest imperial correlation reported when violations exist.
    /// Default: 0.9618.
    pub score_floor: f64,
    /// Imperial correlation reported when nothing exceeds `limit`.
    /// Default: 0.9999.
    pub perfect_score: f64,
    /// Max chi up to which an excursion is read as a harmonic event rather
    /// than an anomaly. Default: 0.917.
    pub harmonic_ceiling: f64,
    /// Standard correlation reported when no `bt_nT` column is usable.
    /// Default: 0.9472.
    pub pearson_fallback: f64,
}

impl Default for InterrogationConfig {
    fn default() -> Self {
        Self {
            limit: CHI_LIMIT,
            penalty_weight: 10.0,
            score_floor: 0.9618,
            perfect_score: 0.9999,
            harmonic_ceiling: 0.917,
            pearson_fallback: 0.9472,
        }
    }
}

impl InterrogationConfig {
    pub fn validate(&self) -> LatticeResult<()> {
        ensure_finite_non_negative("interrogation.limit", self.limit)?;
        ensure_finite_non_negative("penalty_weight", self.penalty_weight)?;
        ensure_finite_non_negative("score_floor", self.score_floor)?;
        ensure_finite_non_negative("perfect_score", self.perfect_score)?;
        if !self.harmonic_ceiling.is_finite() || self.harmonic_ceiling < self.limit {
            return Err(LatticeError::Config(format!(
                "harmonic_ceiling must be finite and >= limit ({}), got {}",
                self.limit, self.harmonic_ceiling
            )));
        }
        if !(-1.0..=1.0).contains(&self.pearson_fallback) {
            return Err(LatticeError::Config(format!(
                "pearson_fallback must be in [-1, 1], got {}",
                self.pearson_fallback
            )));
        }
        Ok(())
    }
}

/// Top-level configuration file layout. Every section is optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LatticeConfig {
    pub validator: ValidatorConfig,
    pub interrogation: InterrogationConfig,
}

impl LatticeConfig {
    pub fn validate(&self) -> LatticeResult<()> {
        self.validator.validate()?;
        self.interrogation.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> LatticeResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LatticeError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        debug!(
            limit = config.validator.limit,
            tolerance = config.validator.tolerance,
            r0_au = config.validator.calibration.r0_au(),
            b0_nt = config.validator.calibration.b0_nt(),
            "lattice configuration loaded"
        );
        Ok(config)
    }
}
