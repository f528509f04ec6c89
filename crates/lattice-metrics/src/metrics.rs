use lattice_guards::ValidationResult;
use prometheus::{
    Encoder, GaugeVec, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};
use telemetry_interrogator::BatchReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("metrics exposition is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

const CHI_BUCKETS: &[f64] = &[0.05, 0.1, 0.15, 0.16, 0.3, 0.5, 0.917, 1.0, 2.0, 5.0];

/// Lattice validation gauges, held in a private registry so several
/// instances can coexist.
pub struct LatticeMetrics {
    registry: Registry,
    pub chi_max: GaugeVec,
    pub observations_total: IntCounterVec,
    pub stress_fraction: GaugeVec,
    pub chi: Histogram,
}

impl LatticeMetrics {
    pub fn new() -> MetricsResult<Self> {
        let registry = Registry::new();

        let chi_max = GaugeVec::new(
            Opts::new("lattice_chi_max", "Largest chi observed per telemetry source"),
            &["source"],
        )?;
        let observations_total = IntCounterVec::new(
            Opts::new(
                "lattice_observations_total",
                "Classified observations per source and status",
            ),
            &["source", "status"],
        )?;
        let stress_fraction = GaugeVec::new(
            Opts::new(
                "lattice_stress_fraction",
                "Share of the last batch flagged as lattice stress",
            ),
            &["source"],
        )?;
        let chi = Histogram::with_opts(
            HistogramOpts::new("lattice_chi", "Distribution of normalized deviation ratios")
                .buckets(CHI_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(chi_max.clone()))?;
        registry.register(Box::new(observations_total.clone()))?;
        registry.register(Box::new(stress_fraction.clone()))?;
        registry.register(Box::new(chi.clone()))?;

        Ok(Self {
            registry,
            chi_max,
            observations_total,
            stress_fraction,
            chi,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn observe_result(&self, source: &str, result: &ValidationResult) {
        self.observations_total
            .with_label_values(&[source, result.status.as_str()])
            .inc();
        self.chi.observe(result.chi);

        let max = self.chi_max.with_label_values(&[source]);
        if result.chi > max.get() {
            max.set(result.chi);
        }
    }

    pub fn observe_batch(&self, source: &str, report: &BatchReport) {
        for outcome in &report.rows {
            self.observe_result(source, &outcome.result);
        }
        self.stress_fraction
            .with_label_values(&[source])
            .set(report.stress_fraction());
    }

    /// Text exposition of everything in the registry.
    pub fn render(&self) -> MetricsResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
