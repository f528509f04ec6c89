use telemetry_interrogator::BatchReport;

use crate::LatticeMetrics;

/// Records `after` and reports whether its stress share grew relative to
/// `before`.
pub fn reject_if_stress_fraction_increases(
    metrics: &LatticeMetrics,
    source: &str,
    before: &BatchReport,
    after: &BatchReport,
) -> bool {
    metrics.observe_batch(source, after);
    after.stress_fraction() > before.stress_fraction()
}
