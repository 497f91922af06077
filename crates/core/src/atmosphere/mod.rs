//! Atmospheric stability for plume dispersion.
//!
//! Near-surface turbulence controls how fast a gas plume spreads sideways and
//! vertically. This module classifies it into Pasquill-Gifford categories and
//! exposes the spread coefficients the Gaussian plume model needs.
//!
//! # References
//!
//! - Pasquill, F. (1961). "The estimation of the dispersion of windborne material."
//!   Meteorological Magazine 90, 33-49.
//! - Gifford, F.A. (1976). "Turbulent diffusion-typing schemes: a review."
//!   Nuclear Safety 17(1), 68-86.

mod stability;

pub use stability::{DispersionCoefficients, StabilityClass};
