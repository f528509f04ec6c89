use crate::{GeometricTensionValidator, LatticeStatus};
use plasma_core::{CalibrationPoint, LatticeError, Observation, ValidatorConfig};
use rand::Rng;

#[test]
fn earth_calibration_is_identity() {
    let v = GeometricTensionValidator::default();
    assert_eq!(v.baseline(Some(1.0)), 5.0);
}

#[test]
fn voyager_tension_follows_inverse_square() {
    let v = GeometricTensionValidator::default();
    let tension = v.baseline(Some(40.0));
    assert!((tension - 5.0 / 1600.0).abs() < 1e-12, "got {tension}");
}

#[test]
fn baseline_positive_for_any_positive_distance() {
    let v = GeometricTensionValidator::default();
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let r: f64 = rng.gen_range(1e-3..1e3);
        assert!(v.baseline(Some(r)) > 0.0, "baseline({r}) not positive");
    }
}

#[test]
fn degenerate_distance_falls_back_to_calibration() {
    let v = GeometricTensionValidator::default();
    assert_eq!(v.baseline(None), 5.0);
    assert_eq!(v.baseline(Some(0.0)), 5.0);
    assert_eq!(v.baseline(Some(-3.0)), 5.0);
    assert_eq!(v.baseline(Some(f64::NAN)), 5.0);

    let chi = v.deviation_ratio(&Observation::from(5.5), Some(-1.0));
    assert!((chi - 0.1).abs() < 1e-12);
}

#[test]
fn small_perturbation_is_stable() {
    let v = GeometricTensionValidator::default();
    let result = v.classify(&Observation::from((5.5, 0.0, 0.0)), Some(1.0));
    assert_eq!(result.observed_mag, 5.5);
    assert_eq!(result.tension_baseline, 5.0);
    assert_eq!(result.chi, 0.1);
    assert_eq!(result.limit, 0.15);
    assert_eq!(result.status, LatticeStatus::Stable);
}

#[test]
fn large_perturbation_is_lattice_stress() {
    let v = GeometricTensionValidator::default();
    let result = v.classify(&Observation::from((6.5, 0.0, 0.0)), Some(1.0));
    assert_eq!(result.observed_mag, 6.5);
    assert_eq!(result.tension_baseline, 5.0);
    assert_eq!(result.chi, 0.3);
    assert_eq!(result.status, LatticeStatus::LatticeStress);
}

#[test]
fn tolerance_edge_is_inclusive() {
    let v = GeometricTensionValidator::default();
    assert_eq!(v.status_for(0.16), LatticeStatus::Stable);
    assert_eq!(v.status_for(0.1601), LatticeStatus::LatticeStress);
    assert_eq!(
        v.classify(&Observation::from(4.2), Some(1.0)).status,
        LatticeStatus::Stable
    );
}

#[test]
fn zero_baseline_gives_zero_chi() {
    let cal = CalibrationPoint::new(1.0, 0.0).unwrap();
    let v = GeometricTensionValidator::new(ValidatorConfig {
        calibration: cal,
        ..ValidatorConfig::default()
    })
    .unwrap();
    assert_eq!(v.deviation_ratio(&Observation::from(12.0), Some(2.0)), 0.0);
    assert_eq!(v.classify(&Observation::from(12.0), None).status, LatticeStatus::Stable);

    let far = GeometricTensionValidator::default();
    assert_eq!(far.deviation_ratio(&Observation::from(1.0), Some(f64::INFINITY)), 0.0);
}

#[test]
fn chi_is_never_negative() {
    let v = GeometricTensionValidator::default();
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let obs = Observation::Vector([
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
            rng.gen_range(-20.0..20.0),
        ]);
        let r = rng.gen_range(-2.0..60.0);
        assert!(v.deviation_ratio(&obs, Some(r)) >= 0.0);
    }
}

#[test]
fn display_rounding_does_not_move_status() {
    let v = GeometricTensionValidator::default();
    // chi = 0.160004 rounds to 0.16 for display but still exceeds the edge.
    let result = v.classify(&Observation::from(5.80002), Some(1.0));
    assert_eq!(result.chi, 0.16);
    assert_eq!(result.status, LatticeStatus::LatticeStress);
}

#[test]
fn invalid_config_and_input_are_rejected() {
    assert!(GeometricTensionValidator::new(ValidatorConfig {
        tolerance: f64::NAN,
        ..ValidatorConfig::default()
    })
    .is_err());

    let v = GeometricTensionValidator::default();
    assert!(v.try_classify(&Observation::from([f64::NAN, 0.0, 0.0]), Some(1.0)).is_err());
    assert!(v.try_classify(&Observation::from(5.0), Some(1.0)).is_ok());
}

#[test]
fn extreme_distances_are_rejected_before_classification() {
    let v = GeometricTensionValidator::default();

    let near = v.try_classify(&Observation::from(5.0), Some(1e-200)).unwrap_err();
    assert!(matches!(
        near,
        LatticeError::BaselineOutOfRange { baseline, .. } if baseline.is_infinite()
    ));

    let far = v.try_classify(&Observation::from(500.0), Some(1e200)).unwrap_err();
    assert!(matches!(far, LatticeError::BaselineOutOfRange { baseline, .. } if baseline == 0.0));

    assert!(v.try_classify(&Observation::from(5.0), Some(f64::INFINITY)).is_err());
    assert!(v.try_classify(&Observation::from(5.0), Some(1e-3)).is_ok());
    assert!(v.try_classify(&Observation::from(5.0), Some(1e3)).is_ok());

    let silent = GeometricTensionValidator::new(ValidatorConfig {
        calibration: CalibrationPoint::new(1.0, 0.0).unwrap(),
        ..ValidatorConfig::default()
    })
    .unwrap();
    assert_eq!(silent.try_classify(&Observation::from(1.0), Some(2.0)).unwrap().chi, 0.0);
}

#[test]
fn status_serializes_as_screaming_labels() {
    let v = GeometricTensionValidator::default();
    let result = v.classify(&Observation::from((6.5, 0.0, 0.0)), Some(1.0));
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["status"], "LATTICE_STRESS");
    assert_eq!(LatticeStatus::Stable.to_string(), "STABLE");
}
