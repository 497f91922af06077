//! Closed-form Gaussian plume model
//!
//! Steady-state point-source dispersion with Gaussian spread in the crosswind
//! and vertical directions:
//!
//! C(x, y) = Q / (2π·U·σy·σz) · exp(−½(y/σy)²) · exp(−½(h/σz)²)
//!
//! with σy, σz from the Pasquill-Gifford class (see [`StabilityClass`]).
//!
//! Plume extent is a screening estimate that grows with √Q and shrinks with
//! wind speed, clamped to a range the zone layer can draw sensibly.
//!
//! # References
//!
//! - Turner, D.B. (1994). "Workbook of Atmospheric Dispersion Estimates", 2nd ed.
//! - US EPA (1995). "ISC3 Model User's Guide", Vol. II (1 m/s calm-wind floor)

use super::PlumeGeometry;
use crate::atmosphere::StabilityClass;
use std::f64::consts::PI;

/// Plume length per unit of √Q / U (m)
pub const PLUME_LENGTH_SCALE: f64 = 500.0;
/// Plume width as a fraction of its length
pub const PLUME_WIDTH_RATIO: f64 = 0.3;
/// Shortest plume the model reports (m)
pub const MIN_PLUME_LENGTH_M: f64 = 100.0;
/// Longest plume the model reports (m)
pub const MAX_PLUME_LENGTH_M: f64 = 5000.0;
/// Narrowest plume the model reports (m)
pub const MIN_PLUME_WIDTH_M: f64 = 30.0;
/// Widest plume the model reports (m)
pub const MAX_PLUME_WIDTH_M: f64 = 1000.0;
/// Lower bound on wind speed in the plume extent, and the stand-in speed
/// for a calm or invalid wind in the concentration formula (m/s)
pub const CALM_WIND_FLOOR: f64 = 1.0;

/// Plume length and width from source strength and wind speed
///
/// `length_factor = √Q / max(1, U)`
/// `length = clamp(500 × length_factor, 100, 5000)`
/// `width = clamp(0.3 × length, 30, 1000)`
///
/// Negative or NaN source strengths are treated as zero release.
#[must_use]
pub fn plume_geometry(source_strength: f64, wind_speed: f64) -> PlumeGeometry {
    let q = source_strength.max(0.0);
    let length_factor = q.sqrt() / wind_speed.max(CALM_WIND_FLOOR);

    let plume_length =
        (PLUME_LENGTH_SCALE * length_factor).clamp(MIN_PLUME_LENGTH_M, MAX_PLUME_LENGTH_M);
    let plume_width =
        (PLUME_WIDTH_RATIO * plume_length).clamp(MIN_PLUME_WIDTH_M, MAX_PLUME_WIDTH_M);

    PlumeGeometry {
        plume_length,
        plume_width,
    }
}

/// Concentration at downwind distance `x`, crosswind offset `y` and release
/// height `h` (all metres)
///
/// Returns 0 for `x <= 0` (upwind or at the source) so the result is always
/// finite and non-negative. Any positive wind speed is used as given; a calm,
/// negative or NaN speed has no finite solution and is evaluated at
/// [`CALM_WIND_FLOOR`].
#[must_use]
pub fn concentration_at_point(
    source_strength: f64,
    wind_speed: f64,
    x: f64,
    y: f64,
    h: f64,
    stability: StabilityClass,
) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }

    let q = source_strength.max(0.0);
    let u = if wind_speed > 0.0 {
        wind_speed
    } else {
        CALM_WIND_FLOOR
    };
    let sigma_y = stability.sigma_y(x);
    let sigma_z = stability.sigma_z(x);

    let term1 = q / (2.0 * PI * u * sigma_y * sigma_z);
    let term2 = (-0.5 * (y / sigma_y).powi(2)).exp();
    let term3 = (-0.5 * (h / sigma_z).powi(2)).exp();

    term1 * term2 * term3
}

/// Ground-level centreline concentration (y = 0, h = 0)
#[inline]
#[must_use]
pub fn centerline_concentration(
    source_strength: f64,
    wind_speed: f64,
    x: f64,
    stability: StabilityClass,
) -> f64 {
    concentration_at_point(source_strength, wind_speed, x, 0.0, 0.0, stability)
}
