use hazard_zone_core::dispersion::{
    gaussian_plume, ModelError, PlumeRegressor, RegressorEstimator,
};
use hazard_zone_core::{
    DispersionModel, ExplosionParameters, GeoPoint, HazardConfig, HazardPipeline, HazardRequest,
    RiskLevel, SafetyLevel, SensorReadings, WindField,
};

#[ctor::ctor]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Regressor whose backend is never reachable
struct Offline;

impl PlumeRegressor for Offline {
    fn predict(&self, _: &[f64]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Unavailable("weights not loaded".into()))
    }
}

/// Regressor that returns three outputs instead of two
struct WrongShape;

impl PlumeRegressor for WrongShape {
    fn predict(&self, _: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(vec![1.0, 2.0, 3.0])
    }
}

/// Regressor scaling the closed form by a fixed factor
struct Scaled(f64);

impl PlumeRegressor for Scaled {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let g = gaussian_plume::plume_geometry(features[0], features[1]);
        Ok(vec![g.plume_length * self.0, g.plume_width * self.0])
    }
}

fn leak() -> HazardRequest {
    HazardRequest {
        readings: SensorReadings {
            mq2: 2400.0,
            mq4: 300.0,
            mq6: 150.0,
            mq8: 20.0,
            temperature: 38.0,
            humidity: 60.0,
        },
        location: GeoPoint::new(19.076, 72.8777),
        wind: WindField::new(3.2, 200.0),
        explosion: serde_json::from_str(
            r#"{
                "energy_release": 2200.0,
                "distance_to_overpressure": {"15kPa": 60.0, "7kPa": 140.0, "3kPa": 320.0},
                "distance_to_radiation": {"10kW/m²": 45.0, "5kW/m²": 90.0, "2kW/m²": 210.0}
            }"#,
        )
        .unwrap(),
    }
}

#[test]
fn test_failed_estimators_match_closed_form() {
    let request = leak();
    let closed = HazardPipeline::default().run(&request);

    let offline = HazardPipeline::default()
        .with_estimator(RegressorEstimator::new("offline", Offline))
        .run(&request);
    let wrong_shape = HazardPipeline::default()
        .with_estimator(RegressorEstimator::new("wrong-shape", WrongShape))
        .run(&request);

    assert_eq!(offline, closed);
    assert_eq!(wrong_shape, closed);
}

#[test]
fn test_working_estimator_changes_plume_only() {
    let request = leak();
    let closed = HazardPipeline::default().run(&request);
    let learned = HazardPipeline::default()
        .with_estimator(RegressorEstimator::new("scaled", Scaled(1.5)))
        .run(&request);

    let c = closed.dispersion.unwrap();
    let l = learned.dispersion.unwrap();
    assert!((l.plume_length - 1.5 * c.plume_length).abs() < 1e-9);
    assert_eq!(l.concentration_at_distance, c.concentration_at_distance);
    assert_eq!(l.stability_class, c.stability_class);
    assert_eq!(learned.zones.unwrap().blast_zones, closed.zones.unwrap().blast_zones);
}

#[test]
fn test_leak_report_contents() {
    let report = HazardPipeline::default().run(&leak());

    assert_eq!(report.threat.risk_level, RiskLevel::High);
    let zones = report.zones.unwrap();
    assert!(!zones.is_fallback);

    let safe = report
        .evacuation_routes
        .iter()
        .filter(|r| r.safety_level == SafetyLevel::Safe)
        .count();
    assert_eq!(safe, 2);
}

#[test]
fn test_custom_trigger_from_config() {
    let config = HazardConfig::parse(r#"{"risk": {"zone_trigger": 0.95}}"#).unwrap();
    let mut request = leak();
    request.readings.mq2 = 1100.0;

    // immediate danger pins the score at 0.8, below this trigger
    let report = HazardPipeline::new(config).run(&request);
    assert_eq!(report.threat.risk_level, RiskLevel::High);
    assert!(report.zones.is_none());
}

#[test]
fn test_malformed_explosion_parameters_fall_back() {
    let mut request = leak();
    request.explosion = ExplosionParameters {
        energy_release: 2200.0,
        ..ExplosionParameters::default()
    };
    request
        .explosion
        .distance_to_radiation
        .insert("2kW/m²", f64::INFINITY);

    let report = HazardPipeline::default().run(&request);
    assert!(report.zones.unwrap().is_fallback);
    // dispersion still reported in full
    assert_eq!(
        report.dispersion.unwrap(),
        DispersionModel::closed_form().predict(2200.0, &request.wind)
    );
}
