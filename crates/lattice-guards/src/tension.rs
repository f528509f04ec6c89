use plasma_core::{CalibrationPoint, LatticeError, LatticeResult, Observation, ValidatorConfig};
use tracing::debug;

use crate::result::{round_to, LatticeStatus, ValidationResult};

/// Checks field observations against the inverse-square lattice tension
/// expected at their distance.
///
/// Pure and stateless beyond its configuration; share it freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricTensionValidator {
    cfg: ValidatorConfig,
}

impl Default for GeometricTensionValidator {
    fn default() -> Self {
        Self {
            cfg: ValidatorConfig::default(),
        }
    }
}

impl GeometricTensionValidator {
    pub fn new(cfg: ValidatorConfig) -> LatticeResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.cfg
    }

    pub fn calibration(&self) -> &CalibrationPoint {
        &self.cfg.calibration
    }

    /// Expected magnitude at `r_au`: `b0 · (r0 / r)²`.
    ///
    /// A missing distance, or one that is not strictly positive, yields the
    /// unscaled calibration magnitude.
    pub fn baseline(&self, r_au: Option<f64>) -> f64 {
        let cal = &self.cfg.calibration;
        match r_au {
            Some(r) if r > 0.0 => cal.b0_nt() * (cal.r0_au() / r).powi(2),
            _ => cal.b0_nt(),
        }
    }

    /// Normalized deviation of the observed magnitude from the baseline.
    /// Zero when the baseline itself is zero.
    pub fn deviation_ratio(&self, observation: &Observation, r_au: Option<f64>) -> f64 {
        let baseline = self.baseline(r_au);
        if baseline == 0.0 {
            return 0.0;
        }
        (observation.magnitude() - baseline).abs() / baseline
    }

    /// Status for an already computed chi; the threshold is inclusive.
    pub fn status_for(&self, chi: f64) -> LatticeStatus {
        if chi <= self.cfg.stability_threshold() {
            LatticeStatus::Stable
        } else {
            LatticeStatus::LatticeStress
        }
    }

    pub fn classify(&self, observation: &Observation, r_au: Option<f64>) -> ValidationResult {
        let chi = self.deviation_ratio(observation, r_au);
        let status = self.status_for(chi);
        let baseline = self.baseline(r_au);
        let observed = observation.magnitude();
        debug!(?r_au, chi, baseline, observed, %status, "classified observation");

        ValidationResult {
            status,
            chi: round_to(chi, 5),
            limit: self.cfg.limit,
            tension_baseline: round_to(baseline, 2),
            observed_mag: round_to(observed, 2),
        }
    }

    /// [`classify`](Self::classify) after rejecting NaN and infinite inputs,
    /// and distances whose baseline overflows to infinity or underflows to
    /// zero while the calibration magnitude is non-zero.
    pub fn try_classify(
        &self,
        observation: &Observation,
        r_au: Option<f64>,
    ) -> LatticeResult<ValidationResult> {
        observation.ensure_finite()?;
        let baseline = self.baseline(r_au);
        let underflow = baseline == 0.0 && self.cfg.calibration.b0_nt() > 0.0;
        if !baseline.is_finite() || underflow {
            return Err(LatticeError::BaselineOutOfRange {
                r_au: r_au.unwrap_or(f64::NAN),
                baseline,
            });
        }
        Ok(self.classify(observation, r_au))
    }
}
