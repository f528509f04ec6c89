use thiserror::Error;

/// Errors raised by lattice configuration and observation checks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    /// An observation field carried NaN or an infinity.
    #[error("non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
    /// The scaled baseline left the finite positive range at this distance.
    #[error("baseline out of range at r_au={r_au}: {baseline}")]
    BaselineOutOfRange { r_au: f64, baseline: f64 },
    /// Configuration failed validation or could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

pub type LatticeResult<T> = Result<T, LatticeError>;
