//! Threat zone construction
//!
//! A release produces three hazard footprints per severity tier:
//!
//! - **Blast**: circles at the overpressure distances (15 / 7 / 3 kPa)
//! - **Thermal**: circles at the radiation distances (10 / 5 / 2 kW/m²)
//! - **Dispersion**: wind-aligned plume ellipses at fractions of the plume axes
//!
//! Per tier the three rings are unioned into a combined threat zone.
//!
//! # Coordinate order
//!
//! Every ring is a closed sequence of [`ZoneVertex`](crate::ZoneVertex),
//! serialized `[longitude, latitude]` as `GeoJSON` expects.

mod builder;
pub mod geometry;
pub mod polygon;
pub mod shapes;

pub use builder::{default_zone_set, ZoneBuilder, FALLBACK_RADII};
pub use geometry::{union_all, GeoBooleanOps, RingGeometry};
pub use polygon::{GeometryError, ZonePolygon, MIN_RING_VERTICES};
pub use shapes::{circle_zone, ellipse_zone, ZONE_VERTEX_COUNT};

use crate::core_types::SeverityMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Overpressure table keys per tier
pub const OVERPRESSURE_KEYS: SeverityMap<&str> = SeverityMap::new("15kPa", "7kPa", "3kPa");

/// Thermal radiation table keys per tier
pub const RADIATION_KEYS: SeverityMap<&str> = SeverityMap::new("10kW/m²", "5kW/m²", "2kW/m²");

/// Named hazard threshold to radius (m)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardDistanceTable(FxHashMap<String, f64>);

impl HazardDistanceTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Radius for a threshold key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Set the radius for a threshold key
    pub fn insert(&mut self, key: impl Into<String>, radius: f64) -> Option<f64> {
        self.0.insert(key.into(), radius)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for HazardDistanceTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Explosion estimate for a release
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionParameters {
    /// Energy released; also the source strength Q for dispersion
    pub energy_release: f64,
    /// Overpressure threshold → radius, keyed by [`OVERPRESSURE_KEYS`]
    #[serde(default)]
    pub distance_to_overpressure: HazardDistanceTable,
    /// Radiation threshold → radius, keyed by [`RADIATION_KEYS`]
    #[serde(default)]
    pub distance_to_radiation: HazardDistanceTable,
}

/// All zone collections for one release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatZoneSet {
    /// Overpressure circles
    pub blast_zones: SeverityMap<ZonePolygon>,
    /// Thermal radiation circles
    pub thermal_zones: SeverityMap<ZonePolygon>,
    /// Plume ellipses
    pub dispersion_zones: SeverityMap<ZonePolygon>,
    /// Per-tier union of the three collections above
    pub combined_threat_zones: SeverityMap<ZonePolygon>,
    /// True when the default circular set replaced a failed build
    #[serde(default)]
    pub is_fallback: bool,
}
