//! Field scenarios for the Delta T engine and classifier
//!
//! Reference values come from the Stull (2011) wet-bulb approximation
//! evaluated at typical spray-window conditions.
//!
//! Run tests with: cargo test --test `delta_t_scenarios`

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{TimeZone, Utc};
use spray_advisor_core::{
    advisory::{ClassifierThresholds, WindUpperBound},
    AdvisoryError, Celsius, ConditionClassifier, DeltaTCategory, DeltaTEngine, InversionStatus,
    KilometersPerHour, Percent, SensorReading, TemperatureDomain, WindCondition,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn wide() -> DeltaTEngine {
    DeltaTEngine::new(TemperatureDomain::WIDE).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Delta T reference values
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_warm_morning_is_ideal() {
    let result = wide().compute(Celsius::new(25.0), Percent::new(60.0)).unwrap();

    assert_abs_diff_eq!(*result.wet_bulb, 19.5027, epsilon = 1e-3);
    assert_abs_diff_eq!(*result.delta_t, 5.4973, epsilon = 1e-3);
    assert_relative_eq!(*result.dew_point, 17.0);
    assert_abs_diff_eq!(*result.feels_like, 27.2534, epsilon = 1e-3);

    let condition = ConditionClassifier::default().classify_delta_t(result.delta_t);
    assert_eq!(condition.category, DeltaTCategory::Ideal);
}

#[test]
fn test_cool_humid_dawn_is_too_low() {
    let result = wide().compute(Celsius::new(10.0), Percent::new(90.0)).unwrap();

    assert_abs_diff_eq!(*result.delta_t, 1.0803, epsilon = 1e-3);
    assert_abs_diff_eq!(*result.feels_like, 9.6411, epsilon = 1e-3);

    let condition = ConditionClassifier::default().classify_delta_t(result.delta_t);
    assert_eq!(condition.category, DeltaTCategory::UnsuitableLow);
    assert!(!condition.category.is_sprayable());
}

#[test]
fn test_hot_afternoon_bands() {
    let classifier = ConditionClassifier::default();

    let borderline = wide().compute(Celsius::new(30.0), Percent::new(40.0)).unwrap();
    assert_abs_diff_eq!(*borderline.delta_t, 9.5508, epsilon = 1e-3);
    assert_relative_eq!(*borderline.feels_like, 31.0);
    assert_eq!(
        classifier.classify_delta_t(borderline.delta_t).category,
        DeltaTCategory::Caution
    );

    let dry = wide().compute(Celsius::new(35.0), Percent::new(15.0)).unwrap();
    assert_abs_diff_eq!(*dry.delta_t, 17.3982, epsilon = 1e-3);
    assert_eq!(
        classifier.classify_delta_t(dry.delta_t).category,
        DeltaTCategory::UnsuitableHigh
    );
}

#[test]
fn test_saturated_air_rounds_to_zero() {
    let result = wide().compute(Celsius::new(20.0), Percent::new(100.0)).unwrap();
    assert_abs_diff_eq!(*result.delta_t, 0.0, epsilon = 0.02);
    assert_relative_eq!(*result.dew_point, 20.0);
}

#[test]
fn test_repeat_calls_are_bit_identical() {
    let engine = wide();
    let a = engine.compute(Celsius::new(17.3), Percent::new(48.2)).unwrap();
    let b = engine.compute(Celsius::new(17.3), Percent::new(48.2)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.delta_t.to_bits(), b.delta_t.to_bits());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Input validation
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_humidity_over_100_rejected() {
    let err = wide()
        .compute(Celsius::new(25.0), Percent::new(105.0))
        .unwrap_err();
    assert_eq!(err, AdvisoryError::InvalidHumidity { value: 105.0 });
    assert!(err.is_input_error());
}

#[test]
fn test_extreme_cold_rejected_by_both_domains() {
    let narrow = DeltaTEngine::new(TemperatureDomain::NARROW).unwrap();
    for engine in [wide(), narrow] {
        assert!(matches!(
            engine.compute(Celsius::new(-60.0), Percent::new(50.0)),
            Err(AdvisoryError::InvalidTemperature { value, .. }) if value == -60.0
        ));
    }
}

#[test]
fn test_frost_only_valid_in_wide_domain() {
    let narrow = DeltaTEngine::new(TemperatureDomain::NARROW).unwrap();
    assert!(wide().compute(Celsius::new(-10.0), Percent::new(80.0)).is_ok());
    assert!(narrow
        .compute(Celsius::new(-10.0), Percent::new(80.0))
        .is_err());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Wind and inversion
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wind_bound_presets() {
    let strict = ConditionClassifier::default();
    let relaxed =
        ConditionClassifier::new(ClassifierThresholds::with_wind_bound(WindUpperBound::Relaxed))
            .unwrap();

    let breeze = KilometersPerHour::new(11.0);
    assert_eq!(
        strict.classify_wind(breeze).category,
        WindCondition::DangerousDrift
    );
    assert_eq!(relaxed.classify_wind(breeze).category, WindCondition::Excellent);
    assert_eq!(
        strict.classify_wind(KilometersPerHour::new(3.0)).category,
        WindCondition::RiskInversion
    );
}

#[test]
fn test_calm_warm_layer_aloft_blocks_spraying() {
    let ts = Utc.with_ymd_and_hms(2024, 10, 2, 5, 30, 0).unwrap();
    let reading = SensorReading::new(ts, Celsius::new(14.0), Percent::new(65.0))
        .with_lower_temp(Celsius::new(12.0))
        .with_wind(KilometersPerHour::new(2.0), None);

    let result = wide().compute_reading(&reading).unwrap();
    let assessment = ConditionClassifier::default().assess(&reading, &result);

    assert_eq!(assessment.inversion, InversionStatus::InversionDetected);
    assert!(!assessment.spray_recommended());
}

#[test]
fn test_missing_ground_sensor_is_insufficient_data() {
    let ts = Utc.with_ymd_and_hms(2024, 10, 2, 9, 0, 0).unwrap();
    let reading = SensorReading::new(ts, Celsius::new(22.0), Percent::new(55.0))
        .with_wind(KilometersPerHour::new(6.0), Some(KilometersPerHour::new(10.0)));

    let result = wide().compute_reading(&reading).unwrap();
    let assessment = ConditionClassifier::default().assess(&reading, &result);

    assert_eq!(assessment.inversion, InversionStatus::InsufficientData);
    assert_eq!(assessment.delta_t.category, DeltaTCategory::Ideal);
    assert!(assessment.spray_recommended());
}
