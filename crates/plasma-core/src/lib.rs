pub mod calibration;
pub mod config;
pub mod constants;
pub mod error;
pub mod observation;
pub mod ratios;

pub use calibration::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use observation::*;
pub use ratios::*;
