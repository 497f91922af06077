//! Planar ring operations
//!
//! Zone combination only needs three capabilities from a computational
//! geometry library: build a ring, union two shapes, and read back the
//! outer ring. `RingGeometry` names exactly those, so the zone builder does
//! not depend on any one library's API. [`GeoBooleanOps`] implements it with
//! the `geo` crate.
//!
//! Operations are planar in (longitude, latitude) degrees. At zone scale
//! (a few km) the distortion is far below the uncertainty of the radii.

use super::polygon::{GeometryError, ZonePolygon, MIN_RING_VERTICES};
use crate::core_types::ZoneVertex;
use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Minimal computational-geometry capability used by the zone builder
pub trait RingGeometry: Send + Sync {
    /// Library-native shape
    type Shape;

    /// Convert a validated ring to a library shape
    ///
    /// # Errors
    /// Rejects rings the library cannot operate on (non-finite coordinates,
    /// zero area).
    fn build_ring(&self, ring: &ZonePolygon) -> Result<Self::Shape, GeometryError>;

    /// Planar union of two shapes
    ///
    /// # Errors
    /// Backend failure on degenerate input.
    fn union(&self, a: &Self::Shape, b: &Self::Shape) -> Result<Self::Shape, GeometryError>;

    /// Outer boundary of a shape as a closed ring
    ///
    /// # Errors
    /// [`GeometryError::EmptyUnion`] when the shape has no polygon.
    fn exterior_ring(&self, shape: &Self::Shape) -> Result<ZonePolygon, GeometryError>;
}

/// `geo`-backed ring operations
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoBooleanOps;

impl RingGeometry for GeoBooleanOps {
    type Shape = MultiPolygon<f64>;

    fn build_ring(&self, ring: &ZonePolygon) -> Result<Self::Shape, GeometryError> {
        let mut coords = Vec::with_capacity(ring.len());
        for (index, v) in ring.vertices().iter().enumerate() {
            if !(v.longitude.is_finite() && v.latitude.is_finite()) {
                return Err(GeometryError::NonFiniteCoordinate { index });
            }
            coords.push(Coord {
                x: v.longitude,
                y: v.latitude,
            });
        }

        let polygon = Polygon::new(LineString::from(coords), vec![]);
        if polygon.unsigned_area() <= 0.0 {
            return Err(GeometryError::ZeroArea);
        }

        Ok(MultiPolygon::new(vec![polygon]))
    }

    fn union(&self, a: &Self::Shape, b: &Self::Shape) -> Result<Self::Shape, GeometryError> {
        // geo's overlay can panic on pathological self-intersecting input
        let result = panic::catch_unwind(AssertUnwindSafe(|| a.union(b)))
            .map_err(|_| GeometryError::Backend("boolean union panicked".into()))?;

        if result.0.is_empty() {
            return Err(GeometryError::EmptyUnion);
        }
        Ok(result)
    }

    fn exterior_ring(&self, shape: &Self::Shape) -> Result<ZonePolygon, GeometryError> {
        // Rings sharing the release point union into one polygon; if the
        // backend returns fragments, the largest one is the zone.
        let largest = shape
            .0
            .iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
            .ok_or(GeometryError::EmptyUnion)?;

        let vertices: Vec<ZoneVertex> = largest
            .exterior()
            .coords()
            .map(|c| ZoneVertex {
                longitude: c.x,
                latitude: c.y,
            })
            .collect();

        if vertices.len() < MIN_RING_VERTICES {
            return Err(GeometryError::EmptyUnion);
        }
        ZonePolygon::from_ring(vertices)
    }
}

/// Union `first` with every ring in `rest` and return the combined outer ring
///
/// Zero-area rings (a 0 m radius, a collapsed plume) contribute nothing and
/// are skipped, so one degenerate member never discards the others.
///
/// # Errors
/// The first other error raised by the backend, or
/// [`GeometryError::EmptyUnion`] when every ring is degenerate.
pub fn union_all<G: RingGeometry>(
    geometry: &G,
    first: &ZonePolygon,
    rest: &[&ZonePolygon],
) -> Result<ZonePolygon, GeometryError> {
    let mut combined: Option<G::Shape> = None;
    for ring in std::iter::once(first).chain(rest.iter().copied()) {
        let shape = match geometry.build_ring(ring) {
            Ok(shape) => shape,
            Err(GeometryError::ZeroArea) => {
                debug!("Skipping zero-area ring in zone union");
                continue;
            }
            Err(e) => return Err(e),
        };
        combined = Some(match combined {
            Some(acc) => geometry.union(&acc, &shape)?,
            None => shape,
        });
    }

    let combined = combined.ok_or(GeometryError::EmptyUnion)?;
    geometry.exterior_ring(&combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::GeoPoint;

    fn square(x0: f64, y0: f64, size: f64) -> ZonePolygon {
        ZonePolygon::close([
            GeoPoint::new(y0, x0),
            GeoPoint::new(y0, x0 + size),
            GeoPoint::new(y0 + size, x0 + size),
            GeoPoint::new(y0 + size, x0),
        ])
        .unwrap()
    }

    fn ring_area(ring: &ZonePolygon) -> f64 {
        GeoBooleanOps
            .build_ring(ring)
            .map(|s| s.unsigned_area())
            .unwrap()
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let union = union_all(&GeoBooleanOps, &a, &[&b]).unwrap();

        assert!(union.is_closed());
        // 4 + 4 - 1 overlap
        assert!((ring_area(&union) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_with_contained_ring_is_outer_ring() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 1.0);
        let union = union_all(&GeoBooleanOps, &inner, &[&outer]).unwrap();
        assert!((ring_area(&union) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_ring_rejects_degenerate_input() {
        let collapsed = ZonePolygon::close([GeoPoint::new(1.0, 1.0); 5]).unwrap();
        assert_eq!(
            GeoBooleanOps.build_ring(&collapsed).unwrap_err(),
            GeometryError::ZeroArea
        );

        let nan = ZonePolygon::close([
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(f64::NAN, 1.0),
            GeoPoint::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            GeoBooleanOps.build_ring(&nan).unwrap_err(),
            GeometryError::NonFiniteCoordinate { index: 1 }
        );
    }

    #[test]
    fn test_union_skips_zero_area_rings() {
        let collapsed = ZonePolygon::close([GeoPoint::new(1.0, 1.0); 5]).unwrap();
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);

        let union = union_all(&GeoBooleanOps, &collapsed, &[&a, &b]).unwrap();
        assert!((ring_area(&union) - 7.0).abs() < 1e-6);

        let union = union_all(&GeoBooleanOps, &a, &[&collapsed]).unwrap();
        assert!((ring_area(&union) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_of_only_degenerate_rings_is_empty() {
        let collapsed = ZonePolygon::close([GeoPoint::new(1.0, 1.0); 5]).unwrap();
        assert_eq!(
            union_all(&GeoBooleanOps, &collapsed, &[&collapsed]).unwrap_err(),
            GeometryError::EmptyUnion
        );
    }

    #[test]
    fn test_exterior_of_empty_shape_is_error() {
        let empty = MultiPolygon::<f64>::new(vec![]);
        assert_eq!(
            GeoBooleanOps.exterior_ring(&empty).unwrap_err(),
            GeometryError::EmptyUnion
        );
    }
}
