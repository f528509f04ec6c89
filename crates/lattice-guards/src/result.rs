use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LatticeStatus {
    Stable,
    LatticeStress,
}

impl LatticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatticeStatus::Stable => "STABLE",
            LatticeStatus::LatticeStress => "LATTICE_STRESS",
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, LatticeStatus::Stable)
    }
}

impl fmt::Display for LatticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one observation.
///
/// Numeric fields are display-rounded: `chi` to 5 decimals, the two
/// magnitudes to 2. `status` was decided on the unrounded chi.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub status: LatticeStatus,
    pub chi: f64,
    pub limit: f64,
    pub tension_baseline: f64,
    pub observed_mag: f64,
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
