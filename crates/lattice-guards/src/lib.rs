mod result;
mod tension;
#[cfg(test)]
mod tests;

pub use result::{LatticeStatus, ValidationResult};
pub use tension::GeometricTensionValidator;
