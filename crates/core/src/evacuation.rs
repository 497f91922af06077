//! Evacuation route generation
//!
//! Three straight routes leave the release point: two crosswind (±90° from
//! the downwind bearing) and one directly upwind. Crosswind routes are
//! rated safe; the upwind route crosses the source's approach side and is
//! only rated risky-but-necessary.
//!
//! Routes are serialized as `GeoJSON` `LineString` objects with
//! `[latitude, longitude]` vertices.

use crate::config::RouteProjection;
use crate::core_types::{Degrees, GeoPoint, Kilometers, RouteVertex};
use crate::geodesy::{planar_offset, point_at_distance};
use serde::{Deserialize, Serialize};

/// Bearing offsets from the downwind direction, in route order
pub const ROUTE_OFFSETS_DEG: [f64; 3] = [90.0, -90.0, 180.0];

/// Points per route (including the origin)
pub const ROUTE_POINTS: usize = 6;

/// Spacing between consecutive route points
pub const ROUTE_STEP: Kilometers = Kilometers::new(0.5);

/// How safe a route is to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SafetyLevel {
    /// Leads crosswind, out of the plume
    Safe,
    /// Leads upwind; use only when crosswind routes are blocked
    RiskyButNecessary,
}

/// One evacuation polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "LineString", rename_all = "camelCase")]
pub struct EvacuationRoute {
    /// Route vertices, origin first
    pub coordinates: Vec<RouteVertex>,
    /// Safety rating
    pub safety_level: SafetyLevel,
    /// Estimated walking time (minutes)
    pub estimated_time_minutes: u32,
}

/// Generate the three evacuation routes for a release
///
/// Route `i` follows bearing `wind_direction + ROUTE_OFFSETS_DEG[i]` with
/// points every 0.5 km out to 2.5 km, and takes `10 + 5i` minutes.
#[must_use]
pub fn generate_evacuation_routes(
    origin: GeoPoint,
    wind_direction: Degrees,
    projection: RouteProjection,
) -> Vec<EvacuationRoute> {
    ROUTE_OFFSETS_DEG
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let bearing = (wind_direction + Degrees::new(offset)).normalized();
            let coordinates = (0..ROUTE_POINTS)
                .map(|step| {
                    let distance = Kilometers::new(ROUTE_STEP.value() * step as f64);
                    let point = match projection {
                        RouteProjection::Planar => planar_offset(origin, bearing, distance),
                        RouteProjection::Geodesic => {
                            point_at_distance(origin, bearing, distance.to_meters())
                        }
                    };
                    point.to_route_vertex()
                })
                .collect();

            EvacuationRoute {
                coordinates,
                safety_level: if i < 2 {
                    SafetyLevel::Safe
                } else {
                    SafetyLevel::RiskyButNecessary
                },
                estimated_time_minutes: 10 + 5 * i as u32,
            }
        })
        .collect()
}
