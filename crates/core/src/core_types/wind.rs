//! Surface wind input

use super::units::{Degrees, MetersPerSecond};
use serde::{Deserialize, Deserializer, Serialize};

/// Uniform surface wind over the affected area.
///
/// `direction` is the downwind bearing: the compass direction the plume is
/// carried toward, clockwise from true north.
///
/// Deserialization goes through [`WindField::new`], so decoded input obeys
/// the same speed and direction ranges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WindField {
    /// Wind speed (m/s, >= 0)
    #[serde(rename = "speed_m_s")]
    pub speed: MetersPerSecond,
    /// Downwind bearing (degrees from north, [0, 360))
    #[serde(rename = "direction_deg")]
    pub direction: Degrees,
}

impl<'de> Deserialize<'de> for WindField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawWind {
            #[serde(rename = "speed_m_s", alias = "speed")]
            speed: f64,
            #[serde(rename = "direction_deg", alias = "direction")]
            direction: f64,
        }

        let raw = RawWind::deserialize(deserializer)?;
        Ok(WindField::new(raw.speed, raw.direction))
    }
}

impl WindField {
    /// Create a wind field. Negative speeds are clamped to calm and the
    /// direction is wrapped into [0, 360).
    #[must_use]
    pub fn new(speed_m_s: f64, direction_deg: f64) -> Self {
        Self {
            speed: MetersPerSecond::new(speed_m_s.max(0.0)),
            direction: Degrees::new(direction_deg).normalized(),
        }
    }

    /// Wind speed as a raw f64 (m/s)
    #[inline]
    #[must_use]
    pub fn speed_m_s(&self) -> f64 {
        self.speed.value()
    }

    /// Downwind bearing as a raw f64 (degrees)
    #[inline]
    #[must_use]
    pub fn direction_deg(&self) -> f64 {
        self.direction.value()
    }
}
