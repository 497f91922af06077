//! Plume-geometry estimator strategy
//!
//! This module defines the `DispersionEstimator` trait, the seam between the
//! dispersion engine and whatever produces plume length/width. The
//! closed-form Gaussian plume is always available; a learned regressor can be
//! plugged in through [`RegressorEstimator`].

use super::{gaussian_plume, PlumeGeometry};
use crate::core_types::WindField;

/// Number of features passed to a plume regressor
pub const REGRESSOR_FEATURES: usize = 3;
/// Number of outputs expected from a plume regressor
pub const REGRESSOR_OUTPUTS: usize = 2;

/// Failure of an alternate plume estimator
///
/// Never escapes [`DispersionModel`](super::DispersionModel): every variant
/// routes the call to the closed-form path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// No model is loaded or the backend is offline
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Model returned the wrong number of outputs
    #[error("model output shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Expected output count
        expected: usize,
        /// Actual output count
        actual: usize,
    },

    /// Model returned a value that cannot be a plume dimension
    #[error("model output {name} is not a positive finite length: {value}")]
    InvalidOutput {
        /// Which output was rejected
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Inference itself failed
    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Backend-agnostic plume-geometry estimator
///
/// Implementations must be pure with respect to their inputs; the engine may
/// call them from several threads at once.
pub trait DispersionEstimator: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Estimate plume length and width
    ///
    /// # Arguments
    ///
    /// * `source_strength` - Release strength Q (energy release from the explosion estimate)
    /// * `wind` - Surface wind (speed and downwind bearing)
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] when no usable estimate can be produced.
    fn predict(&self, source_strength: f64, wind: &WindField) -> Result<PlumeGeometry, ModelError>;
}

/// Closed-form Gaussian plume screening estimate. Infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianPlumeEstimator;

impl DispersionEstimator for GaussianPlumeEstimator {
    fn name(&self) -> &str {
        "gaussian-plume"
    }

    fn predict(&self, source_strength: f64, wind: &WindField) -> Result<PlumeGeometry, ModelError> {
        Ok(gaussian_plume::plume_geometry(
            source_strength,
            wind.speed_m_s(),
        ))
    }
}

/// A trained multi-output regressor
///
/// Features are `[source_strength, wind_speed, wind_direction]`; outputs are
/// expected to be `[plume_length, plume_width]` in metres. Loading and
/// training live outside this crate.
pub trait PlumeRegressor: Send + Sync {
    /// Run inference on one feature row
    ///
    /// # Errors
    ///
    /// Any error the underlying model raises.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Adapts a [`PlumeRegressor`] to the [`DispersionEstimator`] interface,
/// checking output arity and sanity
#[derive(Debug, Clone)]
pub struct RegressorEstimator<R> {
    name: String,
    regressor: R,
}

impl<R: PlumeRegressor> RegressorEstimator<R> {
    /// Wrap a regressor under a display name
    pub fn new(name: impl Into<String>, regressor: R) -> Self {
        Self {
            name: name.into(),
            regressor,
        }
    }
}

fn positive_length(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidOutput { name, value })
    }
}

impl<R: PlumeRegressor> DispersionEstimator for RegressorEstimator<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, source_strength: f64, wind: &WindField) -> Result<PlumeGeometry, ModelError> {
        let features: [f64; REGRESSOR_FEATURES] =
            [source_strength, wind.speed_m_s(), wind.direction_deg()];
        let output = self.regressor.predict(&features)?;

        let &[length, width] = output.as_slice() else {
            return Err(ModelError::ShapeMismatch {
                expected: REGRESSOR_OUTPUTS,
                actual: output.len(),
            });
        };

        Ok(PlumeGeometry {
            plume_length: positive_length("plume_length", length)?,
            plume_width: positive_length("plume_width", width)?,
        })
    }
}
