//! End-to-end hazard assessment using `DispersionModel` and `ZoneBuilder`
//!
//! `HazardPipeline` chains the components for one incident: the threat
//! assessor scores the sensor readings, and only when the score passes the
//! zone trigger does it run dispersion, zone construction and route
//! generation.

use crate::config::HazardConfig;
use crate::core_types::{SourceLocation, WindField};
use crate::dispersion::{DispersionEstimator, DispersionModel, DispersionResult};
use crate::evacuation::{generate_evacuation_routes, EvacuationRoute};
use crate::threat::{assess_threat, SensorReadings, ThreatAssessment};
use crate::zones::{ExplosionParameters, ThreatZoneSet, ZoneBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inputs for one incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardRequest {
    /// Latest sensor readings
    pub readings: SensorReadings,
    /// Release location
    pub location: SourceLocation,
    /// Surface wind
    pub wind: WindField,
    /// Explosion estimate (energy release and hazard distances)
    pub explosion: ExplosionParameters,
}

/// Everything computed for one incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    /// Sensor-based assessment
    pub threat: ThreatAssessment,
    /// Plume estimate, present when zones were computed
    pub dispersion: Option<DispersionResult>,
    /// Hazard zones, present when the risk score passed the trigger
    pub zones: Option<ThreatZoneSet>,
    /// Evacuation routes; empty below the trigger
    pub evacuation_routes: Vec<EvacuationRoute>,
}

impl HazardReport {
    /// True when dispersion, zones and routes were computed
    #[must_use]
    pub fn has_zones(&self) -> bool {
        self.zones.is_some()
    }
}

/// Threat assessment, dispersion, zones and routes behind one call
///
/// Holds no per-request state; one pipeline can serve concurrent callers.
#[derive(Debug, Default)]
pub struct HazardPipeline {
    config: HazardConfig,
    dispersion: DispersionModel,
    zones: ZoneBuilder,
}

impl HazardPipeline {
    /// Create a pipeline using the closed-form dispersion model
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    pub fn new(config: HazardConfig) -> Self {
        info!(
            "Creating hazard pipeline: zone trigger {:.2}, route projection {:?}",
            config.risk.zone_trigger, config.routes.projection
        );
        Self {
            zones: ZoneBuilder::new(config.zones),
            dispersion: DispersionModel::closed_form(),
            config,
        }
    }

    /// Install a learned plume estimator; the closed form remains the fallback
    pub fn with_estimator(mut self, estimator: impl DispersionEstimator + 'static) -> Self {
        info!("Dispersion estimator installed: '{}'", estimator.name());
        self.dispersion = DispersionModel::with_estimator(estimator);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &HazardConfig {
        &self.config
    }

    /// Dispersion engine in use
    pub fn dispersion_model(&self) -> &DispersionModel {
        &self.dispersion
    }

    /// Assess one incident
    ///
    /// Never fails: estimator and geometry problems are absorbed by their
    /// fallbacks and reported through logs (and `ThreatZoneSet::is_fallback`).
    pub fn run(&self, request: &HazardRequest) -> HazardReport {
        let threat = assess_threat(&request.readings, &self.config.sensors, &self.config.risk);

        debug!(
            "Threat at ({:.5}, {:.5}): score {:.3}, level {}",
            request.location.latitude,
            request.location.longitude,
            threat.risk_score,
            threat.risk_level
        );

        if threat.risk_score <= self.config.risk.zone_trigger {
            return HazardReport {
                threat,
                dispersion: None,
                zones: None,
                evacuation_routes: Vec::new(),
            };
        }

        let source_strength = request.explosion.energy_release;
        let dispersion = self.dispersion.predict(source_strength, &request.wind);
        let zones = self.zones.build_or_default(
            request.location,
            &request.explosion,
            &dispersion.geometry(),
            request.wind.direction,
        );
        let evacuation_routes = generate_evacuation_routes(
            request.location,
            request.wind.direction,
            self.config.routes.projection,
        );

        info!(
            "Hazard zones computed: level {}, plume {:.0}x{:.0} m, stability {}, fallback={}",
            threat.risk_level,
            dispersion.plume_length,
            dispersion.plume_width,
            dispersion.stability_class,
            zones.is_fallback
        );

        HazardReport {
            threat,
            dispersion: Some(dispersion),
            zones: Some(zones),
            evacuation_routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::GeoPoint;

    fn request(mq4: f64) -> HazardRequest {
        HazardRequest {
            readings: SensorReadings {
                mq2: 120.0,
                mq4,
                mq6: 80.0,
                mq8: 40.0,
                temperature: 31.0,
                humidity: 55.0,
            },
            location: GeoPoint::new(28.61, 77.23),
            wind: WindField::new(4.0, 270.0),
            explosion: ExplosionParameters {
                energy_release: 1500.0,
                ..ExplosionParameters::default()
            },
        }
    }

    #[test]
    fn test_low_risk_skips_zones() {
        let report = HazardPipeline::default().run(&request(300.0));
        assert!(!report.has_zones());
        assert!(report.dispersion.is_none());
        assert!(report.evacuation_routes.is_empty());
    }

    #[test]
    fn test_high_risk_computes_everything() {
        let report = HazardPipeline::default().run(&request(1500.0));

        let zones = report.zones.as_ref().unwrap();
        assert!(!zones.is_fallback);
        assert_eq!(report.evacuation_routes.len(), 3);

        let dispersion = report.dispersion.unwrap();
        assert_eq!(
            dispersion,
            DispersionModel::closed_form().predict(1500.0, &WindField::new(4.0, 270.0))
        );
    }

    #[test]
    fn test_trigger_is_exclusive() {
        // 0.7 x 0.75 = 0.525 passes the default 0.5 trigger; 0.7 x 0.7 = 0.49 does not
        assert!(HazardPipeline::default().run(&request(750.0)).has_zones());
        assert!(!HazardPipeline::default().run(&request(700.0)).has_zones());
    }

    #[test]
    fn test_report_serializes() {
        let report = HazardPipeline::default().run(&request(2000.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["threat"]["risk_level"], "high");
        assert_eq!(json["evacuation_routes"][0]["type"], "LineString");
        assert!(json["zones"]["combined_threat_zones"]["low"].is_array());
    }
}
