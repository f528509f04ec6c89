use crate::{reject_if_stress_fraction_increases, LatticeMetrics};
use lattice_guards::GeometricTensionValidator;
use plasma_core::Observation;
use telemetry_interrogator::validate_reader;

#[test]
fn result_updates_counters_and_max() {
    let metrics = LatticeMetrics::new().unwrap();
    let v = GeometricTensionValidator::default();

    metrics.observe_result("ace", &v.classify(&Observation::from(5.5), Some(1.0)));
    metrics.observe_result("ace", &v.classify(&Observation::from(6.5), Some(1.0)));
    metrics.observe_result("ace", &v.classify(&Observation::from(5.2), Some(1.0)));

    let stable = metrics
        .observations_total
        .with_label_values(&["ace", "STABLE"])
        .get();
    let stressed = metrics
        .observations_total
        .with_label_values(&["ace", "LATTICE_STRESS"])
        .get();
    assert_eq!(stable, 2);
    assert_eq!(stressed, 1);
    assert_eq!(metrics.chi_max.with_label_values(&["ace"]).get(), 0.3);
    assert_eq!(metrics.chi.get_sample_count(), 3);
}

#[test]
fn independent_registries_do_not_collide() {
    let a = LatticeMetrics::new().unwrap();
    let b = LatticeMetrics::new().unwrap();
    a.chi_max.with_label_values(&["x"]).set(1.0);
    assert_eq!(b.chi_max.with_label_values(&["x"]).get(), 0.0);
}

#[test]
fn render_exposes_metric_names() {
    let metrics = LatticeMetrics::new().unwrap();
    let v = GeometricTensionValidator::default();
    metrics.observe_result("dscovr", &v.classify(&Observation::from(6.5), Some(1.0)));

    let text = metrics.render().unwrap();
    assert!(text.contains("lattice_chi_max"));
    assert!(text.contains("lattice_observations_total"));
    assert!(text.contains("LATTICE_STRESS"));
}

#[test]
fn stress_growth_is_rejected() {
    let metrics = LatticeMetrics::new().unwrap();
    let v = GeometricTensionValidator::default();
    let calm = validate_reader(&v, "r_au,bt_nT\n1.0,5.1\n1.0,5.2\n".as_bytes()).unwrap();
    let stormy = validate_reader(&v, "r_au,bt_nT\n1.0,5.1\n1.0,7.0\n".as_bytes()).unwrap();

    assert!(reject_if_stress_fraction_increases(&metrics, "wind", &calm, &stormy));
    assert_eq!(metrics.stress_fraction.with_label_values(&["wind"]).get(), 0.5);
    assert!(!reject_if_stress_fraction_increases(&metrics, "wind", &stormy, &calm));
    assert_eq!(metrics.stress_fraction.with_label_values(&["wind"]).get(), 0.0);
}
