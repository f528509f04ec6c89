use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, LatticeResult};

/// A field observation: either the three vector components or an already
/// reduced magnitude, both in nT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Observation {
    Vector([f64; 3]),
    Scalar(f64),
}

impl Observation {
    /// Euclidean norm for a vector, absolute value for a scalar.
    pub fn magnitude(&self) -> f64 {
        match *self {
            Observation::Vector([x, y, z]) => (x * x + y * y + z * z).sqrt(),
            Observation::Scalar(b) => b.abs(),
        }
    }

    pub fn ensure_finite(&self) -> LatticeResult<()> {
        match *self {
            Observation::Vector(components) => {
                for (field, value) in ["bx_nT", "by_nT", "bz_nT"].into_iter().zip(components) {
                    if !value.is_finite() {
                        return Err(LatticeError::NonFinite { field, value });
                    }
                }
                Ok(())
            }
            Observation::Scalar(value) if !value.is_finite() => Err(LatticeError::NonFinite {
                field: "bt_nT",
                value,
            }),
            Observation::Scalar(_) => Ok(()),
        }
    }
}

impl From<[f64; 3]> for Observation {
    fn from(v: [f64; 3]) -> Self {
        Observation::Vector(v)
    }
}

impl From<(f64, f64, f64)> for Observation {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Observation::Vector([x, y, z])
    }
}

impl From<f64> for Observation {
    fn from(b: f64) -> Self {
        Observation::Scalar(b)
    }
}
