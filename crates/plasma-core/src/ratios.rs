//! Dimensionless ratios derived from [`CHI_LIMIT`].

use serde::{Deserialize, Serialize};

use crate::constants::{ALPHA, CHI_LIMIT, LAMBDA_BIO, MASS_ELECTRON, MASS_PROTON};

/// Gravitational geometric factor, 1/χ.
pub fn gravity_relationship() -> f64 {
    1.0 / CHI_LIMIT
}

/// Geometric mass prediction, χ⁴.
pub fn matter_relationship() -> f64 {
    CHI_LIMIT.powi(4)
}

pub fn fine_structure_constant() -> f64 {
    ALPHA
}

/// Measured electron/proton mass ratio.
pub fn actual_mass_ratio() -> f64 {
    MASS_ELECTRON / MASS_PROTON
}

/// χ / α, the coupling frequency in Hz (≈ 20.5556).
pub fn coupling_frequency_hz() -> f64 {
    CHI_LIMIT / fine_structure_constant()
}

/// χ · (1/χ); identically one.
pub fn geometric_ratio_1() -> f64 {
    CHI_LIMIT * (1.0 / CHI_LIMIT)
}

/// Cross-domain coupling check, χ⁴ · (1/χ)^¼.
pub fn geometric_ratio_2() -> f64 {
    CHI_LIMIT.powi(4) * (1.0 / CHI_LIMIT).powf(0.25)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MassRatioValidation {
    pub predicted: f64,
    pub actual: f64,
    pub relative_error: f64,
}

impl MassRatioValidation {
    pub fn within(&self, tolerance: f64) -> bool {
        self.relative_error < tolerance
    }
}

/// Compares the χ⁴ prediction with the measured mass ratio.
pub fn mass_ratio_validation() -> MassRatioValidation {
    let predicted = matter_relationship();
    let actual = actual_mass_ratio();
    MassRatioValidation {
        predicted,
        actual,
        relative_error: (predicted - actual).abs() / actual,
    }
}

/// Every ratio of the framework in one serializable record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlasmaLimitReport {
    #[serde(rename = "X")]
    pub x: f64,
    pub gravity_factor: f64,
    pub matter_predicted: f64,
    pub matter_actual: f64,
    pub matter_error_percent: f64,
    pub bio_frequency_hz: f64,
    pub coupling_frequency_hz: f64,
    pub geometric_invariant_1: f64,
    pub geometric_invariant_2: f64,
}

pub fn validate_universal_plasma_limit() -> PlasmaLimitReport {
    let mass = mass_ratio_validation();
    PlasmaLimitReport {
        x: CHI_LIMIT,
        gravity_factor: gravity_relationship(),
        matter_predicted: mass.predicted,
        matter_actual: mass.actual,
        matter_error_percent: mass.relative_error * 100.0,
        bio_frequency_hz: LAMBDA_BIO,
        coupling_frequency_hz: coupling_frequency_hz(),
        geometric_invariant_1: geometric_ratio_1(),
        geometric_invariant_2: geometric_ratio_2(),
    }
}
