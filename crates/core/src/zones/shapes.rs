//! Hazard ring construction
//!
//! Circles for blast and thermal radii, wind-aligned ellipses for the gas
//! plume. Every vertex is placed with the spherical direct solution
//! ([`point_at_distance`]), so ring vertices sit at true ground distances.

use super::polygon::ZonePolygon;
use crate::core_types::{Degrees, GeoPoint, Meters};
use crate::geodesy::point_at_distance;
use nalgebra::{Rotation2, Vector2};

/// Distinct vertices per ring (one every 10°)
pub const ZONE_VERTEX_COUNT: usize = 36;

fn sample_angle(index: usize) -> f64 {
    index as f64 * (360.0 / ZONE_VERTEX_COUNT as f64)
}

/// Circle of `radius` around `center`: vertices at bearings 0°, 10°, …, 350°
#[must_use]
pub fn circle_zone(center: GeoPoint, radius: Meters) -> ZonePolygon {
    ZonePolygon::close_sampled(std::array::from_fn::<_, ZONE_VERTEX_COUNT, _>(|i| {
        point_at_distance(center, Degrees::new(sample_angle(i)), radius)
    }))
}

/// Plume ellipse anchored at the release point
///
/// The ellipse has full axes `major` (downwind) and `minor` (crosswind). Its
/// upwind vertex is the source, so the ring reaches `major` metres downwind
/// and `minor / 2` metres either side of the plume axis.
///
/// For each sample angle α the local offset is
/// (crosswind, downwind) = (minor/2 · sin α, major/2 · (1 + cos α)),
/// rotated clockwise by the downwind bearing and placed with the direct
/// geodesic solution.
#[must_use]
pub fn ellipse_zone(
    center: GeoPoint,
    major: Meters,
    minor: Meters,
    wind_direction: Degrees,
) -> ZonePolygon {
    let semi_major = major.value() / 2.0;
    let semi_minor = minor.value() / 2.0;
    // Compass bearings turn clockwise; nalgebra rotates counter-clockwise in (east, north)
    let rotation = Rotation2::new(-wind_direction.to_radians());

    ZonePolygon::close_sampled(std::array::from_fn::<_, ZONE_VERTEX_COUNT, _>(|i| {
        let alpha = sample_angle(i).to_radians();
        let local = Vector2::new(semi_minor * alpha.sin(), semi_major * (1.0 + alpha.cos()));
        let offset = rotation * local;

        let distance = offset.norm();
        let bearing = offset.x.atan2(offset.y).to_degrees();
        point_at_distance(center, Degrees::new(bearing), Meters::new(distance))
    }))
}
