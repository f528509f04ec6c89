//! Fixed physical and geometric constants of the plasma lattice model.

/// Universal Plasma Limit (χ).
pub const CHI_LIMIT: f64 = 0.15;

/// Measurement noise floor added on top of [`CHI_LIMIT`] before a point is
/// flagged.
pub const CHI_TOLERANCE: f64 = 0.01;

/// Fine-structure constant (α).
pub const ALPHA: f64 = 1.0 / 137.035999;

/// Electron rest mass in kg.
pub const MASS_ELECTRON: f64 = 9.10938356e-31;

/// Proton rest mass in kg.
pub const MASS_PROTON: f64 = 1.6726219e-27;

/// Biological resonance frequency (Λ) in Hz.
pub const LAMBDA_BIO: f64 = 20.56;

/// Calibration radius: Earth orbit, in AU.
pub const R_CALIBRATION_AU: f64 = 1.0;

/// Field magnitude observed at [`R_CALIBRATION_AU`], in nT.
pub const B_CALIBRATION_NT: f64 = 5.0;
