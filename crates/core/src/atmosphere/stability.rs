//! Pasquill-Gifford stability classification
//!
//! The class is derived from wind speed alone, using half-open intervals:
//!
//! | Wind speed (m/s) | Class |
//! |------------------|-------|
//! | < 2              | A     |
//! | [2, 3)           | B     |
//! | [3, 5)           | C     |
//! | [5, 6)           | D     |
//! | [6, 7)           | E     |
//! | >= 7             | F     |
//!
//! Each class carries power-law spread coefficients:
//! σy = a·x^0.9, σz = b·x^0.7 with x the downwind distance in metres.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Crosswind spread exponent
const SIGMA_Y_EXPONENT: f64 = 0.9;
/// Vertical spread exponent
const SIGMA_Z_EXPONENT: f64 = 0.7;

/// Pasquill-Gifford atmospheric stability classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StabilityClass {
    /// A: Very unstable
    A,
    /// B: Moderately unstable
    B,
    /// C: Slightly unstable
    C,
    /// D: Neutral
    D,
    /// E: Slightly stable
    E,
    /// F: Very stable
    F,
}

/// Plume spread (standard deviations of the Gaussian profile) at a distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionCoefficients {
    /// Crosswind standard deviation σy (m)
    pub sigma_y: f64,
    /// Vertical standard deviation σz (m)
    pub sigma_z: f64,
}

impl StabilityClass {
    /// Classify from wind speed (m/s)
    ///
    /// Total over all inputs: NaN fails every `<` comparison and lands in F.
    #[must_use]
    pub fn from_wind_speed(wind_speed: f64) -> Self {
        if wind_speed < 2.0 {
            StabilityClass::A
        } else if wind_speed < 3.0 {
            StabilityClass::B
        } else if wind_speed < 5.0 {
            StabilityClass::C
        } else if wind_speed < 6.0 {
            StabilityClass::D
        } else if wind_speed < 7.0 {
            StabilityClass::E
        } else {
            StabilityClass::F
        }
    }

    /// Power-law coefficients (a, b) for σy and σz
    #[must_use]
    pub const fn coefficients(self) -> (f64, f64) {
        match self {
            StabilityClass::A => (0.22, 0.20),
            StabilityClass::B => (0.16, 0.12),
            StabilityClass::C => (0.11, 0.08),
            StabilityClass::D => (0.08, 0.06),
            StabilityClass::E => (0.06, 0.03),
            StabilityClass::F => (0.04, 0.02),
        }
    }

    /// Crosswind spread σy at downwind distance `x` (m)
    #[inline]
    #[must_use]
    pub fn sigma_y(self, x: f64) -> f64 {
        self.coefficients().0 * x.powf(SIGMA_Y_EXPONENT)
    }

    /// Vertical spread σz at downwind distance `x` (m)
    #[inline]
    #[must_use]
    pub fn sigma_z(self, x: f64) -> f64 {
        self.coefficients().1 * x.powf(SIGMA_Z_EXPONENT)
    }

    /// Both spreads at downwind distance `x` (m)
    #[must_use]
    pub fn dispersion_coefficients(self, x: f64) -> DispersionCoefficients {
        DispersionCoefficients {
            sigma_y: self.sigma_y(x),
            sigma_z: self.sigma_z(x),
        }
    }

    /// Single-letter label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StabilityClass::A => "A",
            StabilityClass::B => "B",
            StabilityClass::C => "C",
            StabilityClass::D => "D",
            StabilityClass::E => "E",
            StabilityClass::F => "F",
        }
    }
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
