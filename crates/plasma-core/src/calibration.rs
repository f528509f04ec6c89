use serde::{Deserialize, Serialize};

use crate::constants::{B_CALIBRATION_NT, R_CALIBRATION_AU};
use crate::error::{LatticeError, LatticeResult};

/// Reference point the inverse-square baseline is scaled from.
///
/// Fixed once constructed: there are no setters, and deserialized points
/// are checked through [`CalibrationPoint::validate`] by the config loader.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalibrationPoint {
    r0_au: f64,
    b0_nt: f64,
}

impl CalibrationPoint {
    pub fn new(r0_au: f64, b0_nt: f64) -> LatticeResult<Self> {
        let point = Self { r0_au, b0_nt };
        point.validate()?;
        Ok(point)
    }

    /// Reference distance in AU.
    pub fn r0_au(&self) -> f64 {
        self.r0_au
    }

    /// Reference magnitude in nT.
    pub fn b0_nt(&self) -> f64 {
        self.b0_nt
    }

    pub fn validate(&self) -> LatticeResult<()> {
        if !self.r0_au.is_finite() || self.r0_au <= 0.0 {
            return Err(LatticeError::Config(format!(
                "calibration r0_au must be finite and > 0, got {}",
                self.r0_au
            )));
        }
        if !self.b0_nt.is_finite() || self.b0_nt < 0.0 {
            return Err(LatticeError::Config(format!(
                "calibration b0_nt must be finite and >= 0, got {}",
                self.b0_nt
            )));
        }
        Ok(())
    }
}

impl Default for CalibrationPoint {
    /// Solar-system calibration: 5.0 nT at 1.0 AU.
    fn default() -> Self {
        Self {
            r0_au: R_CALIBRATION_AU,
            b0_nt: B_CALIBRATION_NT,
        }
    }
}
