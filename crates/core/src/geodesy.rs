//! Spherical-Earth geodesy
//!
//! Distance and destination-point primitives on a sphere of radius
//! [`EARTH_RADIUS_M`]. Hazard footprints span at most a few kilometres, where
//! the spherical model is within a fraction of a percent of the ellipsoid.
//!
//! # Caller contract
//!
//! Inputs are assumed to be valid coordinates (latitude in [-90, 90],
//! longitude in [-180, 180]). Nothing here range-checks; invalid input gives
//! a meaningless but finite result rather than a panic.
//!
//! # References
//!
//! - Sinnott, R.W. (1984). "Virtues of the Haversine". Sky and Telescope 68(2), 159
//! - Williams, E. "Aviation Formulary V1.47" (direct solution on the sphere)

use crate::core_types::{Degrees, GeoPoint, Kilometers, Meters};

/// Mean Earth radius used by every spherical formula in this crate (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometres per degree of latitude used by the small-angle approximation
pub const KM_PER_DEGREE: f64 = 111.32;

/// Great-circle distance between two points (haversine formula)
///
/// d = 2R × asin(√(sin²(Δφ/2) + cos φ1 cos φ2 sin²(Δλ/2)))
#[must_use]
pub fn haversine_distance(p1: GeoPoint, p2: GeoPoint) -> Meters {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards asin against a = 1 + ε from rounding at antipodes
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Meters::new(EARTH_RADIUS_M * c)
}

/// Destination point given a start, bearing and distance (direct problem)
///
/// lat2 = asin(sin φ1 cos δ + cos φ1 sin δ cos θ)
/// lon2 = λ1 + atan2(sin θ sin δ cos φ1, cos δ − sin φ1 sin φ2)
///
/// where δ = d/R and θ is the bearing (0 = north, 90 = east). The longitude
/// is not wrapped, so rings sampled around a point near ±180° stay
/// continuous in the plane.
#[must_use]
pub fn point_at_distance(origin: GeoPoint, bearing: Degrees, distance: Meters) -> GeoPoint {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let theta = bearing.to_radians();
    let delta = distance.value() / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Initial great-circle bearing from `from` toward `to`, in [0, 360)
#[must_use]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> Degrees {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    Degrees::new(y.atan2(x).to_degrees()).normalized()
}

/// Flat-Earth small-angle offset
///
/// dlat = d cos θ / 111.32, dlon = d sin θ / (111.32 cos φ)
///
/// Bounded-error approximation, only valid over a few kilometres away from
/// the poles. Evacuation routes use it by default; everything else uses
/// [`point_at_distance`].
#[must_use]
pub fn planar_offset(origin: GeoPoint, bearing: Degrees, distance: Kilometers) -> GeoPoint {
    let theta = bearing.to_radians();
    let d = distance.value();

    let dlat = d * theta.cos() / KM_PER_DEGREE;
    let dlon = d * theta.sin() / (KM_PER_DEGREE * origin.latitude.to_radians().cos());

    GeoPoint::new(origin.latitude + dlat, origin.longitude + dlon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        // R × π/180
        assert_relative_eq!(*d, 111_194.93, epsilon = 0.01);
    }

    #[test]
    fn test_haversine_is_symmetric_and_zero_on_identity() {
        let a = GeoPoint::new(-33.87, 151.21);
        let b = GeoPoint::new(-37.81, 144.96);
        assert_relative_eq!(*haversine_distance(a, b), *haversine_distance(b, a), epsilon = 1e-6);
        assert_eq!(*haversine_distance(a, a), 0.0);
    }

    #[test]
    fn test_point_at_distance_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        let north = point_at_distance(origin, Degrees::new(0.0), Meters::new(1000.0));
        assert!(north.latitude > 0.0);
        assert_relative_eq!(north.longitude, 0.0, epsilon = 1e-12);

        let east = point_at_distance(origin, Degrees::new(90.0), Meters::new(1000.0));
        assert!(east.longitude > 0.0);
        assert_relative_eq!(east.latitude, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_at_zero_distance_is_origin() {
        let origin = GeoPoint::new(28.61, 77.23);
        let p = point_at_distance(origin, Degrees::new(123.0), Meters::ZERO);
        assert_relative_eq!(p.latitude, origin.latitude, epsilon = 1e-12);
        assert_relative_eq!(p.longitude, origin.longitude, epsilon = 1e-12);
    }

    #[test]
    fn test_point_at_distance_is_continuous_across_antimeridian() {
        let origin = GeoPoint::new(0.0, 179.999);
        let p = point_at_distance(origin, Degrees::new(90.0), Meters::new(1000.0));
        assert!(p.longitude > 180.0, "expected unwrapped longitude, got {}", p.longitude);
        assert!(p.longitude - origin.longitude < 0.01);
        assert_relative_eq!(*haversine_distance(origin, p), 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_initial_bearing_matches_requested_bearing() {
        let origin = GeoPoint::new(51.5, -0.12);
        for bearing in [0.0, 45.0, 90.0, 180.0, 270.0] {
            let p = point_at_distance(origin, Degrees::new(bearing), Meters::new(2000.0));
            let back = initial_bearing(origin, p);
            assert!(
                back.angular_distance(Degrees::new(bearing)) < 0.01,
                "bearing {bearing} came back as {back}"
            );
        }
    }

    #[test]
    fn test_planar_offset_close_to_geodesic_at_short_range() {
        let origin = GeoPoint::new(28.61, 77.23);
        let planar = planar_offset(origin, Degrees::new(45.0), Kilometers::new(2.5));
        let geodesic = point_at_distance(origin, Degrees::new(45.0), Meters::new(2500.0));
        // Within 1% of the leg length at 2.5 km
        assert!(*haversine_distance(planar, geodesic) < 25.0);
    }
}
