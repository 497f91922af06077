//! Gas dispersion engine
//!
//! Produces plume extent and downwind concentrations for a release. The
//! plume geometry comes from a [`DispersionEstimator`]: the closed-form
//! Gaussian plume by default, or a learned regressor when one is injected.
//!
//! # Estimator Selection
//!
//! One rule, applied per call:
//! 1. If a learned estimator is installed and returns a valid geometry, use it
//! 2. Otherwise use the closed-form Gaussian plume (always available)
//!
//! Either way the caller receives a fully populated [`DispersionResult`];
//! the concentration samples always come from the closed-form model.
//!
//! # Example
//!
//! ```
//! use hazard_zone_core::dispersion::DispersionModel;
//! use hazard_zone_core::WindField;
//!
//! let model = DispersionModel::default();
//! let result = model.predict(1000.0, &WindField::new(5.0, 90.0));
//! assert!(result.concentration_at_distance.at_100m > result.concentration_at_distance.at_1000m);
//! ```

pub mod estimator;
pub mod gaussian_plume;

pub use estimator::{
    DispersionEstimator, GaussianPlumeEstimator, ModelError, PlumeRegressor, RegressorEstimator,
};

use crate::atmosphere::{DispersionCoefficients, StabilityClass};
use crate::core_types::WindField;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Downwind distances at which concentrations are sampled (m)
pub const SAMPLE_DISTANCES_M: [f64; 3] = [100.0, 500.0, 1000.0];

/// Plume extent (metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeGeometry {
    /// Downwind length of the plume (m)
    pub plume_length: f64,
    /// Crosswind width of the plume (m)
    pub plume_width: f64,
}

/// Which path produced a plume geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// Output of the injected learned estimator
    Model(PlumeGeometry),
    /// Closed-form Gaussian plume
    ClosedForm(PlumeGeometry),
}

impl Estimate {
    /// The geometry regardless of origin
    #[must_use]
    pub fn geometry(&self) -> PlumeGeometry {
        match *self {
            Estimate::Model(g) | Estimate::ClosedForm(g) => g,
        }
    }

    /// True when the learned estimator's output was used
    #[must_use]
    pub fn is_model(&self) -> bool {
        matches!(self, Estimate::Model(_))
    }
}

/// Ground-level centreline concentrations at the fixed sample distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationProfile {
    /// Concentration 100 m downwind
    #[serde(rename = "100m")]
    pub at_100m: f64,
    /// Concentration 500 m downwind
    #[serde(rename = "500m")]
    pub at_500m: f64,
    /// Concentration 1000 m downwind
    #[serde(rename = "1000m")]
    pub at_1000m: f64,
}

impl ConcentrationProfile {
    /// Sample the closed-form model at [`SAMPLE_DISTANCES_M`]
    #[must_use]
    pub fn sample(source_strength: f64, wind_speed: f64, stability: StabilityClass) -> Self {
        let [at_100m, at_500m, at_1000m] = SAMPLE_DISTANCES_M.map(|x| {
            gaussian_plume::centerline_concentration(source_strength, wind_speed, x, stability)
        });
        Self {
            at_100m,
            at_500m,
            at_1000m,
        }
    }

    /// `(distance, concentration)` pairs, nearest first
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> {
        SAMPLE_DISTANCES_M
            .into_iter()
            .zip([self.at_100m, self.at_500m, self.at_1000m])
    }
}

/// Complete dispersion estimate for one release
///
/// Every field is always populated, whichever estimator produced the plume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionResult {
    /// Downwind plume length (m)
    pub plume_length: f64,
    /// Crosswind plume width (m)
    pub plume_width: f64,
    /// Downwind reach, equal to `plume_length` (m)
    pub downwind_distance: f64,
    /// Half-width either side of the plume axis (m)
    pub crosswind_distance: f64,
    /// Pasquill-Gifford class derived from wind speed
    pub stability_class: StabilityClass,
    /// σy/σz evaluated at `plume_length`
    pub dispersion_coefficients: DispersionCoefficients,
    /// Centreline concentrations at 100/500/1000 m
    pub concentration_at_distance: ConcentrationProfile,
}

impl DispersionResult {
    /// Assemble a result from a plume geometry and the release conditions
    #[must_use]
    pub fn from_geometry(geometry: PlumeGeometry, source_strength: f64, wind: &WindField) -> Self {
        let stability = StabilityClass::from_wind_speed(wind.speed_m_s());
        Self {
            plume_length: geometry.plume_length,
            plume_width: geometry.plume_width,
            downwind_distance: geometry.plume_length,
            crosswind_distance: geometry.plume_width / 2.0,
            stability_class: stability,
            dispersion_coefficients: stability.dispersion_coefficients(geometry.plume_length),
            concentration_at_distance: ConcentrationProfile::sample(
                source_strength,
                wind.speed_m_s(),
                stability,
            ),
        }
    }

    /// Plume geometry part of the result
    #[must_use]
    pub fn geometry(&self) -> PlumeGeometry {
        PlumeGeometry {
            plume_length: self.plume_length,
            plume_width: self.plume_width,
        }
    }
}

/// Dispersion engine with an optional learned estimator
///
/// Holds no mutable state; a single instance can serve concurrent requests.
#[derive(Default)]
pub struct DispersionModel {
    learned: Option<Box<dyn DispersionEstimator>>,
}

impl fmt::Debug for DispersionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispersionModel")
            .field("learned", &self.learned.as_ref().map(|e| e.name().to_owned()))
            .finish()
    }
}

impl DispersionModel {
    /// Engine using only the closed-form Gaussian plume
    #[must_use]
    pub fn closed_form() -> Self {
        Self { learned: None }
    }

    /// Engine that tries `estimator` first and falls back to the closed form
    #[must_use]
    pub fn with_estimator(estimator: impl DispersionEstimator + 'static) -> Self {
        Self {
            learned: Some(Box::new(estimator)),
        }
    }

    /// Name of the installed learned estimator, if any
    #[must_use]
    pub fn estimator_name(&self) -> Option<&str> {
        self.learned.as_deref().map(|e| e.name())
    }

    /// Select a plume geometry for this release
    ///
    /// Learned-estimator failures are logged and answered with the closed
    /// form; they never reach the caller.
    #[must_use]
    pub fn estimate(&self, source_strength: f64, wind: &WindField) -> Estimate {
        if let Some(estimator) = &self.learned {
            match estimator.predict(source_strength, wind) {
                Ok(geometry) => {
                    debug!(
                        "Plume estimated by '{}': length {:.1} m, width {:.1} m",
                        estimator.name(),
                        geometry.plume_length,
                        geometry.plume_width
                    );
                    return Estimate::Model(geometry);
                }
                Err(e) => {
                    warn!(
                        "Dispersion estimator '{}' failed: {}. Falling back to Gaussian plume.",
                        estimator.name(),
                        e
                    );
                }
            }
        }

        Estimate::ClosedForm(gaussian_plume::plume_geometry(
            source_strength,
            wind.speed_m_s(),
        ))
    }

    /// Full dispersion estimate for a release
    ///
    /// # Arguments
    ///
    /// * `source_strength` - Release strength Q
    /// * `wind` - Surface wind
    #[must_use]
    pub fn predict(&self, source_strength: f64, wind: &WindField) -> DispersionResult {
        let estimate = self.estimate(source_strength, wind);
        DispersionResult::from_geometry(estimate.geometry(), source_strength, wind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct AlwaysFails;

    impl DispersionEstimator for AlwaysFails {
        fn name(&self) -> &str {
            "always-fails"
        }

        fn predict(&self, _: f64, _: &WindField) -> Result<PlumeGeometry, ModelError> {
            Err(ModelError::Unavailable("no weights".into()))
        }
    }

    struct Constant(PlumeGeometry);

    impl DispersionEstimator for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn predict(&self, _: f64, _: &WindField) -> Result<PlumeGeometry, ModelError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_closed_form_result_fields() {
        let wind = WindField::new(5.0, 90.0);
        let r = DispersionModel::closed_form().predict(1000.0, &wind);

        assert_eq!(r.downwind_distance, r.plume_length);
        assert_relative_eq!(r.crosswind_distance, r.plume_width / 2.0);
        assert_eq!(r.stability_class, StabilityClass::D);
        assert_relative_eq!(
            r.dispersion_coefficients.sigma_y,
            StabilityClass::D.sigma_y(r.plume_length)
        );
    }

    #[test]
    fn test_concentration_decays_downwind() {
        let r = DispersionModel::default().predict(2500.0, &WindField::new(3.5, 0.0));
        let c = r.concentration_at_distance;
        assert!(c.at_100m > c.at_500m);
        assert!(c.at_500m > c.at_1000m);
        assert!(c.at_1000m >= 0.0);
    }

    #[test]
    fn test_failed_estimator_falls_back_to_closed_form() {
        let wind = WindField::new(4.0, 45.0);
        let model = DispersionModel::with_estimator(AlwaysFails);
        let estimate = model.estimate(900.0, &wind);

        assert!(!estimate.is_model());
        assert_eq!(
            estimate.geometry(),
            gaussian_plume::plume_geometry(900.0, 4.0)
        );
        assert_eq!(
            model.predict(900.0, &wind),
            DispersionModel::closed_form().predict(900.0, &wind)
        );
    }

    #[test]
    fn test_successful_estimator_is_used() {
        let geometry = PlumeGeometry {
            plume_length: 1234.0,
            plume_width: 321.0,
        };
        let model = DispersionModel::with_estimator(Constant(geometry));
        assert_eq!(model.estimator_name(), Some("constant"));

        let estimate = model.estimate(10.0, &WindField::new(2.0, 180.0));
        assert_eq!(estimate, Estimate::Model(geometry));

        let r = model.predict(10.0, &WindField::new(2.0, 180.0));
        assert_eq!(r.plume_length, 1234.0);
        assert_eq!(r.crosswind_distance, 160.5);
    }

    #[test]
    fn test_result_serializes_sample_keys() {
        let r = DispersionModel::default().predict(1000.0, &WindField::new(5.0, 90.0));
        let json = serde_json::to_value(r).unwrap();
        assert!(json["concentration_at_distance"]["100m"].is_number());
        assert!(json["concentration_at_distance"]["1000m"].is_number());
        assert_eq!(json["stability_class"], "D");
    }
}
