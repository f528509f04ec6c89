mod guards;
mod metrics;
#[cfg(test)]
mod tests;

pub use guards::reject_if_stress_fraction_increases;
pub use metrics::{LatticeMetrics, MetricsError, MetricsResult};
