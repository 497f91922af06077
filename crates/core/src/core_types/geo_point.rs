//! Geographic point types
//!
//! Zone rings and evacuation routes are emitted with opposite axis orders:
//! zone rings follow `GeoJSON` (`[lon, lat]`) while route polylines are
//! `[lat, lon]`, which is what the downstream map layer consumes. Each order
//! gets its own vertex type so an axis swap is a type error instead of a
//! polygon drawn on the other side of the planet. Conversions go through
//! [`GeoPoint`].

use serde::{Deserialize, Serialize};

/// A position on the Earth's surface in decimal degrees.
///
/// Callers are expected to pass latitude in [-90, 90] and longitude in
/// [-180, 180]. Nothing in this crate checks that; out-of-range input yields
/// meaningless (but finite) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

/// Location of the release source, as reported by the sensor registry.
pub type SourceLocation = GeoPoint;

impl GeoPoint {
    /// Create a point from latitude and longitude (degrees)
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both coordinates are finite numbers
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// This point as a zone-ring vertex (`[lon, lat]`)
    #[inline]
    #[must_use]
    pub fn to_zone_vertex(self) -> ZoneVertex {
        ZoneVertex::from(self)
    }

    /// This point as a route vertex (`[lat, lon]`)
    #[inline]
    #[must_use]
    pub fn to_route_vertex(self) -> RouteVertex {
        RouteVertex::from(self)
    }
}

/// Zone-ring vertex, serialized in `GeoJSON` order `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ZoneVertex {
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
}

impl From<[f64; 2]> for ZoneVertex {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<ZoneVertex> for [f64; 2] {
    fn from(v: ZoneVertex) -> Self {
        [v.longitude, v.latitude]
    }
}

impl From<GeoPoint> for ZoneVertex {
    fn from(p: GeoPoint) -> Self {
        Self {
            longitude: p.longitude,
            latitude: p.latitude,
        }
    }
}

impl From<ZoneVertex> for GeoPoint {
    fn from(v: ZoneVertex) -> Self {
        GeoPoint::new(v.latitude, v.longitude)
    }
}

/// Evacuation-route vertex, serialized as `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct RouteVertex {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl From<[f64; 2]> for RouteVertex {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<RouteVertex> for [f64; 2] {
    fn from(v: RouteVertex) -> Self {
        [v.latitude, v.longitude]
    }
}

impl From<GeoPoint> for RouteVertex {
    fn from(p: GeoPoint) -> Self {
        Self {
            latitude: p.latitude,
            longitude: p.longitude,
        }
    }
}

impl From<RouteVertex> for GeoPoint {
    fn from(v: RouteVertex) -> Self {
        GeoPoint::new(v.latitude, v.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_vertex_serializes_lon_first() {
        let v = GeoPoint::new(28.61, 77.23).to_zone_vertex();
        assert_eq!(serde_json::to_string(&v).unwrap(), "[77.23,28.61]");
    }

    #[test]
    fn test_route_vertex_serializes_lat_first() {
        let v = GeoPoint::new(28.61, 77.23).to_route_vertex();
        assert_eq!(serde_json::to_string(&v).unwrap(), "[28.61,77.23]");
    }

    #[test]
    fn test_vertex_types_agree_through_geopoint() {
        let zone: ZoneVertex = serde_json::from_str("[151.2, -33.9]").unwrap();
        let route = RouteVertex::from(GeoPoint::from(zone));
        assert_eq!(route.latitude, -33.9);
        assert_eq!(route.longitude, 151.2);
    }
}
